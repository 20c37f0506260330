use std::error::Error;

use yao_types::{CircuitError, WireId};

/// Boxed error from a collaborator.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors returned by the garbler driver.
///
/// None of these are retried and none fall back to sending plaintext bits.
#[derive(Debug, thiserror::Error)]
pub enum GarblerError {
    /// Sending the public package or waiting for its acknowledgement failed.
    #[error("circuit {circuit}: channel failure")]
    ChannelFailure {
        /// Circuit id.
        circuit: String,
        /// Underlying channel error.
        #[source]
        source: BoxError,
    },
    /// The circuit, or the bits built against it, are inconsistent.
    #[error("malformed circuit")]
    MalformedCircuit(#[from] CircuitError),
    /// The oblivious transfer exchange failed.
    #[error("circuit {circuit}: oblivious transfer failed")]
    OtFailure {
        /// Circuit id.
        circuit: String,
        /// Underlying OT error.
        #[source]
        source: BoxError,
    },
    /// The evaluator's result lacks an output wire.
    #[error("circuit {circuit}: evaluator result is missing output wire {wire}")]
    MissingOutput {
        /// Circuit id.
        circuit: String,
        /// The missing wire.
        wire: WireId,
    },
    /// The private input does not have the expected number of bits.
    #[error("private input has {actual} bits, expected {expected}")]
    PrivateInputSizeMismatch {
        /// Expected bit count.
        expected: usize,
        /// Bits supplied.
        actual: usize,
    },
    /// Truth-table enumeration over too many inputs.
    #[error("circuit {circuit}: {inputs} inputs exceed the enumeration limit of {limit}")]
    EnumerationTooLarge {
        /// Circuit id.
        circuit: String,
        /// Alice plus Bob wire count.
        inputs: usize,
        /// Configured limit.
        limit: usize,
    },
    /// More output wires than fit in a `u64`.
    #[error("circuit {circuit}: {outputs} output wires do not fit in a u64")]
    OutputTooWide {
        /// Circuit id.
        circuit: String,
        /// Output wire count.
        outputs: usize,
    },
    /// Evaluation was requested for a circuit the evaluator has not acknowledged.
    #[error("circuit {circuit} has not been acknowledged by the evaluator")]
    NotSent {
        /// Circuit id.
        circuit: String,
    },
    /// The private input provider failed.
    #[error("private input unavailable")]
    Input(#[source] BoxError),
    /// The circuit source failed.
    #[error("circuit source failed")]
    Source(#[source] BoxError),
    /// Writing to the report sink failed.
    #[error("failed to write report")]
    Report(#[from] std::io::Error),
}
