//! Cleartext circuit execution.
//!
//! Runs a topology on plain bits, without any garbling. Useful for checking
//! what the garbled protocol should produce.

use std::collections::HashMap;

use anyhow::{Context, Result, ensure};
use bitvec::slice::BitSlice;
use yao_types::{CircuitTopology, WireId};

/// Evaluates `topology` on plaintext inputs and returns the output bits in
/// output order.
///
/// The topology is validated first, so malformed gates are errors.
pub fn exec(topology: &CircuitTopology, alice: &BitSlice, bob: &BitSlice) -> Result<Vec<bool>> {
    topology.validate()?;
    ensure!(
        alice.len() == topology.alice.len() && bob.len() == topology.bob.len(),
        "circuit {} takes {}+{} input bits, got {}+{}",
        topology.id,
        topology.alice.len(),
        topology.bob.len(),
        alice.len(),
        bob.len()
    );

    let mut values: HashMap<WireId, bool> = topology
        .alice
        .iter()
        .copied()
        .zip(alice.iter().by_vals())
        .chain(topology.bob.iter().copied().zip(bob.iter().by_vals()))
        .collect();

    let value = |values: &HashMap<WireId, bool>, wire: WireId| {
        values
            .get(&wire)
            .copied()
            .with_context(|| format!("wire {wire} read before it is driven"))
    };

    for gate in &topology.gates {
        let a = value(&values, gate.inputs[0])?;
        let b = match gate.inputs.get(1) {
            Some(&w) => value(&values, w)?,
            None => false,
        };
        values.insert(gate.id, gate.kind.apply(a, b));
    }

    topology.out.iter().map(|&w| value(&values, w)).collect()
}

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;

    use super::*;
    use crate::{adder, and_gate, greater_than};

    fn to_bits(value: u64, width: usize) -> BitVec {
        (0..width).rev().map(|i| (value >> i) & 1 == 1).collect()
    }

    fn to_value(bits: &[bool]) -> u64 {
        bits.iter().fold(0, |acc, &b| (acc << 1) | u64::from(b))
    }

    #[test]
    fn test_exec_and() {
        let c = and_gate();
        assert_eq!(exec(&c, bits![1], bits![1]).unwrap(), [true]);
        assert_eq!(exec(&c, bits![1], bits![0]).unwrap(), [false]);
    }

    #[test]
    fn test_exec_adder_exhaustive() {
        let c = adder(3);
        for a in 0..8 {
            for b in 0..8 {
                let out = exec(&c, &to_bits(a, 3), &to_bits(b, 3)).unwrap();
                assert_eq!(to_value(&out), a + b, "{a} + {b}");
            }
        }
    }

    #[test]
    fn test_exec_greater_than_exhaustive() {
        let c = greater_than(3);
        for a in 0..8 {
            for b in 0..8 {
                let out = exec(&c, &to_bits(a, 3), &to_bits(b, 3)).unwrap();
                assert_eq!(out, [a > b], "{a} > {b}");
            }
        }
    }

    #[test]
    fn test_exec_rejects_malformed_gate() {
        let mut c = and_gate();
        c.gates[0].inputs.clear();
        assert!(exec(&c, bits![1], bits![1]).is_err());
    }

    #[test]
    fn test_exec_rejects_wrong_width() {
        assert!(exec(&and_gate(), bits![1, 0], bits![1]).is_err());
    }
}
