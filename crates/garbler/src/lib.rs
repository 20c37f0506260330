//! Garbler side of Yao's garbled-circuit protocol.
//!
//! [`GarblerSession`] walks the circuits of a [`CircuitSource`], sends each
//! one's public package to the evaluator, and then distributes input keys
//! through oblivious transfer. It either enumerates every input combination
//! to print a truth table, or evaluates the garbler's single private input.
//!
//! Garbling, OT and transport are supplied by the caller through the traits in
//! [`yao_types::traits`].
//!
//! [`CircuitSource`]: yao_types::traits::CircuitSource

mod config;
mod decode;
pub mod encoding;
mod enumerate;
mod error;
pub mod input;
mod report;
mod role;
mod session;

pub use config::*;
pub use decode::*;
pub use enumerate::*;
pub use error::*;
pub use report::*;
pub use role::*;
pub use session::*;

#[cfg(test)]
mod tests {
    // Used by integration tests and benches only.
    use criterion as _;
    use indexmap as _;
    use serde_json as _;
    use yao_fixtures as _;
}
