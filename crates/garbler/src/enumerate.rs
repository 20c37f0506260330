//! Input combinations and truth-table rows for the diagnostic mode.

use bitvec::vec::BitVec;
use yao_types::{GarbledCircuit, format_wires};

/// Hard ceiling on the number of inputs enumerated, so `2^N` fits in a `u64`.
pub const MAX_ENUMERATION_INPUTS: usize = 63;

/// Iterator over every `width`-bit combination in counting order.
///
/// Each item is most significant bit first, so the first bits of the combined
/// input vary slowest.
#[derive(Debug, Clone)]
pub struct Combinations {
    width: usize,
    next: u64,
    end: u64,
}

/// Returns all `2^width` combinations of `width` bits.
///
/// # Panics
///
/// If `width` exceeds [`MAX_ENUMERATION_INPUTS`].
pub fn combinations(width: usize) -> Combinations {
    assert!(
        width <= MAX_ENUMERATION_INPUTS,
        "cannot enumerate {width} inputs"
    );
    Combinations {
        width,
        next: 0,
        end: 1u64 << width,
    }
}

impl Iterator for Combinations {
    type Item = BitVec;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        let n = self.next;
        self.next += 1;
        Some((0..self.width).rev().map(|i| (n >> i) & 1 == 1).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.end - self.next).ok();
        (left.unwrap_or(usize::MAX), left)
    }
}

/// One line of a truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    /// Garbler bits, in Alice-wire order.
    pub alice: BitVec,
    /// Evaluator bits assumed for display, in Bob-wire order.
    ///
    /// The evaluator's real input is never seen by the garbler; this column
    /// only holds if the evaluator follows the same enumeration order.
    pub bob: BitVec,
    /// Decoded output bits, in output-wire order.
    pub outputs: Vec<bool>,
}

fn join_bits(bits: impl Iterator<Item = bool>) -> String {
    bits.map(|b| if b { "1" } else { "0" })
        .collect::<Vec<_>>()
        .join(" ")
}

impl TruthTableRow {
    /// Formats the row against the circuit's wire labels.
    pub fn format(&self, circuit: &GarbledCircuit) -> String {
        format!(
            "  Alice{} = {} Bob{} = {}  Outputs{} = {}",
            format_wires(circuit.alice()),
            join_bits(self.alice.iter().by_vals()),
            format_wires(circuit.bob()),
            join_bits(self.bob.iter().by_vals()),
            format_wires(circuit.outputs()),
            join_bits(self.outputs.iter().copied()),
        )
    }
}

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;

    use super::*;

    fn as_string(bits: &BitVec) -> String {
        bits.iter()
            .by_vals()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_combinations_msb_first() {
        let all: Vec<String> = combinations(3).map(|b| as_string(&b)).collect();
        assert_eq!(
            all,
            vec!["000", "001", "010", "011", "100", "101", "110", "111"]
        );
    }

    #[test]
    fn test_combinations_size() {
        assert_eq!(combinations(0).count(), 1);
        assert_eq!(combinations(5).size_hint(), (32, Some(32)));
    }

    #[test]
    fn test_row_split_keeps_alice_prefix() {
        let bits = bitvec![1, 0, 1];
        let (alice, bob) = bits.split_at(2);
        assert_eq!(alice, bits![1, 0]);
        assert_eq!(bob, bits![1]);
    }
}
