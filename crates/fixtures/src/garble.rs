//! Reference point-and-permute garbling.
//!
//! Every wire gets a random key pair and a random permutation bit. A gate's
//! table has one row per combination of masked input bits, in masked-bit
//! order, and each row encrypts the output key and masked output bit under a
//! pad derived from the input keys. Good enough to drive the protocol end to
//! end. Not a hardened scheme.

use indexmap::IndexMap;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use yao_types::{
    CircuitError, CircuitTopology, GarbledCircuit, GarbledTables, Label, WireId, WireKeyPair,
};

/// Size of one table row: a 16-byte key plus the masked bit.
pub const ROW_LEN: usize = 17;

/// Garbles `topology` with keys and permutation bits drawn from `rng`.
pub fn garble<R: Rng + ?Sized>(
    topology: CircuitTopology,
    rng: &mut R,
) -> Result<GarbledCircuit, CircuitError> {
    topology.validate()?;

    let mut keys = IndexMap::new();
    let mut pbits = IndexMap::new();
    let wires = topology
        .alice
        .iter()
        .chain(&topology.bob)
        .copied()
        .chain(topology.gates.iter().map(|g| g.id));
    for wire in wires {
        keys.insert(wire, WireKeyPair::new(Label(rng.random()), Label(rng.random())));
        pbits.insert(wire, rng.random::<bool>());
    }

    let mut tables = GarbledTables::new();
    for gate in &topology.gates {
        // Validation guarantees every gate input was assigned above.
        let (Some(&out_keys), Some(&out_p)) = (keys.get(&gate.id), pbits.get(&gate.id)) else {
            continue;
        };
        let a = gate.inputs[0];
        let b = gate.inputs.get(1).copied();

        let mut rows = Vec::with_capacity(1 << gate.inputs.len());
        for ma in [false, true] {
            for mb in [false, true] {
                if b.is_none() && mb {
                    continue;
                }
                let va = ma ^ pbits[&a];
                let ka = keys[&a].get(va);
                let (vb, kb) = match b {
                    Some(b) => {
                        let vb = mb ^ pbits[&b];
                        (vb, Some(keys[&b].get(vb)))
                    }
                    None => (false, None),
                };

                let vo = gate.kind.apply(va, vb);
                let mut row = [0u8; ROW_LEN];
                row[..16].copy_from_slice(out_keys.get(vo).as_bytes());
                row[16] = u8::from(vo ^ out_p);

                let row_id = row_index(ma, b.map(|_| mb));
                let pad = row_pad(gate.id, row_id, &ka, kb.as_ref());
                for (byte, p) in row.iter_mut().zip(pad) {
                    *byte ^= p;
                }
                rows.push(row.to_vec());
            }
        }
        tables.insert(gate.id, rows);
    }

    GarbledCircuit::new(topology, tables, pbits, keys)
}

/// Garbles `topology` with a ChaCha20 stream seeded from `seed`.
pub fn garble_seeded(topology: CircuitTopology, seed: u64) -> Result<GarbledCircuit, CircuitError> {
    garble(topology, &mut ChaCha20Rng::seed_from_u64(seed))
}

/// Table row selected by the masked input bits. Unary gates have two rows.
pub(crate) const fn row_index(ma: bool, mb: Option<bool>) -> usize {
    match mb {
        Some(mb) => ((ma as usize) << 1) | mb as usize,
        None => ma as usize,
    }
}

/// Encryption pad for one table row.
pub(crate) fn row_pad(gate: WireId, row: usize, a: &Label, b: Option<&Label>) -> [u8; ROW_LEN] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(a.as_bytes());
    if let Some(b) = b {
        hasher.update(b.as_bytes());
    }
    hasher.update(&gate.0.to_le_bytes());
    hasher.update(&[row as u8]);

    let mut pad = [0u8; ROW_LEN];
    hasher.finalize_xof().fill(&mut pad);
    pad
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adder, and_gate};

    #[test]
    fn test_garble_shapes() {
        let circuit = garble_seeded(adder(2), 1).unwrap();

        assert_eq!(circuit.tables().len(), circuit.topology().gates.len());
        for gate in &circuit.topology().gates {
            let rows = circuit.tables().get(gate.id).unwrap();
            assert_eq!(rows.len(), 1 << gate.kind.arity());
            assert!(rows.iter().all(|r| r.len() == ROW_LEN));
        }
        for &wire in circuit.alice().iter().chain(circuit.bob()) {
            let (k0, k1) = circuit.key_pair(wire).unwrap().keys();
            assert_ne!(k0, k1);
        }
    }

    #[test]
    fn test_garble_is_deterministic_per_seed() {
        let a = garble_seeded(and_gate(), 9).unwrap();
        let b = garble_seeded(and_gate(), 9).unwrap();
        let c = garble_seeded(and_gate(), 10).unwrap();

        assert_eq!(a.tables(), b.tables());
        assert_ne!(a.tables(), c.tables());
    }

    #[test]
    fn test_garble_rejects_invalid_topology() {
        let mut topology = and_gate();
        topology.out.push(WireId(7));
        assert!(matches!(
            garble_seeded(topology, 0),
            Err(CircuitError::UndrivenOutput { wire: WireId(7), .. })
        ));
    }
}
