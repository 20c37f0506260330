use yao_types::PrivateInputVector;

use crate::MAX_ENUMERATION_INPUTS;

/// Default cap on the number of inputs a truth table is enumerated over.
pub const DEFAULT_MAX_ENUMERATION_INPUTS: usize = 16;

/// What the driver does with each circuit after the evaluator acknowledges it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the full truth table by running one OT round per input
    /// combination.
    TruthTable,
    /// Evaluate the garbler's one private input and decode the result.
    SingleInput(PrivateInputVector),
}

/// What the driver does when a circuit fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the session and return the error.
    #[default]
    Abort,
    /// Record the error against the circuit and move on to the next one.
    SkipCircuit,
}

/// Configuration for a [`GarblerSession`](crate::GarblerSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarblerConfig {
    /// Evaluation mode.
    pub mode: Mode,
    /// Failure handling across circuits.
    pub failure_policy: FailurePolicy,
    /// Largest Alice plus Bob wire count accepted in truth-table mode.
    pub max_enumeration_inputs: usize,
}

impl GarblerConfig {
    /// Truth-table mode with default settings.
    pub fn truth_table() -> Self {
        Self::default()
    }

    /// Single-input mode for `input`.
    pub fn single_input(input: PrivateInputVector) -> Self {
        Self {
            mode: Mode::SingleInput(input),
            ..Self::default()
        }
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the enumeration limit. Values above the hard ceiling are clamped.
    pub fn with_max_enumeration_inputs(mut self, limit: usize) -> Self {
        self.max_enumeration_inputs = limit.min(MAX_ENUMERATION_INPUTS);
        self
    }

    pub(crate) fn enumeration_limit(&self) -> usize {
        self.max_enumeration_inputs.min(MAX_ENUMERATION_INPUTS)
    }
}

impl Default for GarblerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::TruthTable,
            failure_policy: FailurePolicy::Abort,
            max_enumeration_inputs: DEFAULT_MAX_ENUMERATION_INPUTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_limit_is_clamped() {
        let config = GarblerConfig::truth_table().with_max_enumeration_inputs(1000);
        assert_eq!(config.max_enumeration_inputs, MAX_ENUMERATION_INPUTS);

        let config = GarblerConfig {
            max_enumeration_inputs: usize::MAX,
            ..GarblerConfig::default()
        };
        assert_eq!(config.enumeration_limit(), MAX_ENUMERATION_INPUTS);
    }

    #[test]
    fn test_single_input_keeps_defaults() {
        let input: PrivateInputVector = "10".parse().expect("bits");
        let config = GarblerConfig::single_input(input.clone());

        assert_eq!(config.mode, Mode::SingleInput(input));
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.max_enumeration_inputs, DEFAULT_MAX_ENUMERATION_INPUTS);
    }
}
