use indexmap::IndexMap;

use crate::WireId;

/// Decoded output bits of one OT round, keyed by output wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResult(IndexMap<WireId, bool>);

impl EvaluationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the decoded bit of `wire`.
    pub fn insert(&mut self, wire: WireId, bit: bool) {
        self.0.insert(wire, bit);
    }

    /// Decoded bit of `wire`, if the evaluator reported it.
    pub fn bit(&self, wire: WireId) -> Option<bool> {
        self.0.get(&wire).copied()
    }

    /// Number of reported wires.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(wire, bit)` pairs in the order they were reported.
    pub fn iter(&self) -> impl Iterator<Item = (WireId, bool)> + '_ {
        self.0.iter().map(|(&w, &b)| (w, b))
    }
}

impl FromIterator<(WireId, bool)> for EvaluationResult {
    fn from_iter<I: IntoIterator<Item = (WireId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
