//! Gate types and gate records.

use serde::{Deserialize, Serialize};

use crate::WireId;

/// Boolean gate type.
///
/// Serialised with the upper-case names used by circuit description files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[expect(missing_docs, reason = "gate names are self-describing")]
pub enum GateType {
    AND,
    OR,
    XOR,
    NAND,
    NOR,
    XNOR,
    NOT,
}

impl GateType {
    /// Number of input wires the gate reads.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            GateType::NOT => 1,
            _ => 2,
        }
    }

    /// Applies the gate to plaintext inputs.
    ///
    /// For [`GateType::NOT`] the second input is ignored.
    #[inline]
    pub const fn apply(self, a: bool, b: bool) -> bool {
        match self {
            GateType::AND => a & b,
            GateType::OR => a | b,
            GateType::XOR => a ^ b,
            GateType::NAND => !(a & b),
            GateType::NOR => !(a | b),
            GateType::XNOR => !(a ^ b),
            GateType::NOT => !a,
        }
    }
}

/// One gate of a circuit: the wire it drives, its type and the wires it reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Output wire, which also identifies the gate.
    pub id: WireId,
    /// Gate type.
    #[serde(rename = "type")]
    pub kind: GateType,
    /// Input wires, `kind.arity()` of them.
    #[serde(rename = "in")]
    pub inputs: Vec<WireId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_truth_tables() {
        let cases = [
            (GateType::AND, [false, false, false, true]),
            (GateType::OR, [false, true, true, true]),
            (GateType::XOR, [false, true, true, false]),
            (GateType::NAND, [true, true, true, false]),
            (GateType::NOR, [true, false, false, false]),
            (GateType::XNOR, [true, false, false, true]),
        ];

        for (kind, expected) in cases {
            for (i, want) in expected.into_iter().enumerate() {
                let a = i & 2 != 0;
                let b = i & 1 != 0;
                assert_eq!(kind.apply(a, b), want, "{kind:?}({a}, {b})");
            }
        }

        assert!(GateType::NOT.apply(false, true));
        assert!(!GateType::NOT.apply(true, false));
    }

    #[test]
    fn test_gate_arity() {
        assert_eq!(GateType::NOT.arity(), 1);
        assert_eq!(GateType::AND.arity(), 2);
        assert_eq!(GateType::XNOR.arity(), 2);
    }

    #[test]
    fn test_gate_json_field_names() {
        let gate: Gate = serde_json::from_str(r#"{"id": 3, "type": "AND", "in": [1, 2]}"#)
            .expect("valid gate");
        assert_eq!(gate.id, WireId(3));
        assert_eq!(gate.kind, GateType::AND);
        assert_eq!(gate.inputs, vec![WireId(1), WireId(2)]);
    }
}
