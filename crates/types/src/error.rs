use crate::{GateType, WireId};

/// Reasons a circuit is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    /// A wire appears twice in the Alice, Bob and output lists combined.
    #[error("circuit {circuit}: wire {wire} is listed more than once across alice/bob/out")]
    OverlappingWire {
        /// Circuit id.
        circuit: String,
        /// The repeated wire.
        wire: WireId,
    },
    /// Fewer permutation bits than input wires.
    #[error("circuit {circuit}: {have} permutation bits for {need} input wires")]
    InsufficientPermutationBits {
        /// Circuit id.
        circuit: String,
        /// Permutation bits supplied.
        have: usize,
        /// Alice plus Bob wire count.
        need: usize,
    },
    /// A wire that needs a permutation bit has none.
    #[error("circuit {circuit}: wire {wire} has no permutation bit")]
    MissingPermutationBit {
        /// Circuit id.
        circuit: String,
        /// The wire lacking a bit.
        wire: WireId,
    },
    /// An input wire has no key pair.
    #[error("circuit {circuit}: input wire {wire} has no key pair")]
    MissingKeyPair {
        /// Circuit id.
        circuit: String,
        /// The wire lacking keys.
        wire: WireId,
    },
    /// The declared input wires do not match the wires the gates read.
    #[error("circuit {circuit}: {declared} declared input wires but the gates read {actual}")]
    InputArityMismatch {
        /// Circuit id.
        circuit: String,
        /// Alice plus Bob wire count.
        declared: usize,
        /// Distinct wires read without being produced.
        actual: usize,
    },
    /// A gate reads a wire that is neither an input nor an earlier gate output.
    #[error("circuit {circuit}: gate {gate} reads undefined wire {wire}")]
    UndefinedWire {
        /// Circuit id.
        circuit: String,
        /// The offending gate.
        gate: WireId,
        /// The undefined wire.
        wire: WireId,
    },
    /// A wire is driven by more than one gate, or a gate drives an input wire.
    #[error("circuit {circuit}: wire {wire} is driven more than once")]
    DuplicateGateOutput {
        /// Circuit id.
        circuit: String,
        /// The wire driven twice.
        wire: WireId,
    },
    /// A gate has the wrong number of inputs for its type.
    #[error("circuit {circuit}: {kind:?} gate {gate} has {got} inputs, expected {expected}")]
    GateArity {
        /// Circuit id.
        circuit: String,
        /// The offending gate.
        gate: WireId,
        /// Its type.
        kind: GateType,
        /// Inputs supplied.
        got: usize,
        /// Inputs required by the gate type.
        expected: usize,
    },
    /// An output wire is not driven by any gate.
    #[error("circuit {circuit}: output wire {wire} is never driven")]
    UndrivenOutput {
        /// Circuit id.
        circuit: String,
        /// The output wire.
        wire: WireId,
    },
    /// A bit vector does not line up with the wires it is meant for.
    #[error("circuit {circuit}: {wires} wires but {bits} bits")]
    WireBitCountMismatch {
        /// Circuit id.
        circuit: String,
        /// Wire count.
        wires: usize,
        /// Bit count.
        bits: usize,
    },
}
