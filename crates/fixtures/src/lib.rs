//! In-process stand-ins for the garbler's collaborators.
//!
//! A reference point-and-permute garbler, an evaluator that plays the other
//! side of the protocol with ideal OT, a cleartext executor, a few circuit
//! builders and the JSON circuit description format. Used by tests, benches
//! and the demo binary.

mod builders;
mod description;
mod evaluate;
mod exec;
mod garble;

pub use builders::*;
pub use description::*;
pub use evaluate::*;
pub use exec::*;
pub use garble::*;
