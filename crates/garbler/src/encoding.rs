//! Key and permutation-bit encoding.
//!
//! A wire with true bit `b` and permutation bit `p` is disclosed as the key
//! `keys[b]` together with the masked bit `b ^ p`. The key pair is indexed by
//! the true bit; only the disclosed bit is permuted. Permutation bits always
//! come from the circuit, they are never recomputed here.

use bitvec::slice::BitSlice;
use yao_types::{
    AliceEntries, BobOptionTable, BobOptions, CircuitError, GarbledCircuit, MaskedInput, WireId,
};

/// Masks a true bit with a permutation bit.
#[inline]
pub const fn mask_bit(bit: bool, pbit: bool) -> bool {
    bit ^ pbit
}

/// Recovers the true bit from a masked bit.
#[inline]
pub const fn unmask_bit(masked: bool, pbit: bool) -> bool {
    masked ^ pbit
}

fn pbit(circuit: &GarbledCircuit, wire: WireId) -> Result<bool, CircuitError> {
    circuit
        .permutation_bit(wire)
        .ok_or_else(|| CircuitError::MissingPermutationBit {
            circuit: circuit.id().to_owned(),
            wire,
        })
}

/// Builds the masked entry for `wire` carrying the true bit `bit`.
pub fn encode_wire(
    circuit: &GarbledCircuit,
    wire: WireId,
    bit: bool,
) -> Result<MaskedInput, CircuitError> {
    let p = pbit(circuit, wire)?;
    let pair = circuit
        .key_pair(wire)
        .ok_or_else(|| CircuitError::MissingKeyPair {
            circuit: circuit.id().to_owned(),
            wire,
        })?;

    Ok(MaskedInput {
        key: pair.get(bit),
        masked_bit: mask_bit(bit, p),
    })
}

/// Builds the garbler's masked entries, pairing Alice wire `i` with `bits[i]`.
///
/// Fails before building anything if the bit count differs from the wire
/// count.
pub fn encode_alice_inputs(
    circuit: &GarbledCircuit,
    bits: &BitSlice,
) -> Result<AliceEntries, CircuitError> {
    let wires = circuit.alice();
    if wires.len() != bits.len() {
        return Err(CircuitError::WireBitCountMismatch {
            circuit: circuit.id().to_owned(),
            wires: wires.len(),
            bits: bits.len(),
        });
    }

    wires
        .iter()
        .zip(bits.iter().by_vals())
        .map(|(&wire, bit)| Ok((wire, encode_wire(circuit, wire, bit)?)))
        .collect()
}

/// Builds both OT options for every evaluator wire.
///
/// Independent of any input, so one table serves every round on a circuit.
pub fn bob_option_table(circuit: &GarbledCircuit) -> Result<BobOptionTable, CircuitError> {
    circuit
        .bob()
        .iter()
        .map(|&wire| {
            let options = BobOptions([
                encode_wire(circuit, wire, false)?,
                encode_wire(circuit, wire, true)?,
            ]);
            Ok((wire, options))
        })
        .collect()
}
