//! Shared types for the garbler side of Yao's garbled-circuit protocol.
//!
//! This crate holds the circuit data model that the garbler driver, the
//! evaluator and the test fixtures all agree on, along with the traits that
//! describe the driver's collaborators (circuit sources, channels and input
//! providers).

mod circuit;
mod error;
mod gate;
mod input;
mod result;
pub mod traits;
mod wire;

pub use circuit::*;
pub use error::*;
pub use gate::*;
pub use input::*;
pub use result::*;
pub use wire::*;
