//! Circuit topology, garbled circuit records and the public package.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{CircuitError, Gate, WireId, WireKeyPair};

/// Public structure of a boolean circuit.
///
/// Wire lists are ordered: position `i` of `alice` is bound to bit `i` of the
/// garbler's input vector, and `out` is read most significant wire first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitTopology {
    /// Circuit identifier.
    pub id: String,
    /// Garbler-owned input wires.
    #[serde(default)]
    pub alice: Vec<WireId>,
    /// Evaluator-owned input wires.
    #[serde(default)]
    pub bob: Vec<WireId>,
    /// Output wires.
    pub out: Vec<WireId>,
    /// Gates in evaluation order.
    pub gates: Vec<Gate>,
}

impl CircuitTopology {
    /// Number of input wires, Alice and Bob combined.
    pub fn input_count(&self) -> usize {
        self.alice.len() + self.bob.len()
    }

    /// Checks the structural invariants of the topology.
    ///
    /// Wire lists must be pairwise disjoint, gates must appear in evaluation
    /// order with the right arity, every declared input must be read, and
    /// every output must be driven by a gate.
    pub fn validate(&self) -> Result<(), CircuitError> {
        let mut listed = HashSet::new();
        for &wire in self.alice.iter().chain(&self.bob).chain(&self.out) {
            if !listed.insert(wire) {
                return Err(CircuitError::OverlappingWire {
                    circuit: self.id.clone(),
                    wire,
                });
            }
        }

        let inputs: HashSet<WireId> = self.alice.iter().chain(&self.bob).copied().collect();
        let mut defined = inputs.clone();
        let mut read_inputs = HashSet::new();

        for gate in &self.gates {
            if gate.inputs.len() != gate.kind.arity() {
                return Err(CircuitError::GateArity {
                    circuit: self.id.clone(),
                    gate: gate.id,
                    kind: gate.kind,
                    got: gate.inputs.len(),
                    expected: gate.kind.arity(),
                });
            }

            for &wire in &gate.inputs {
                if !defined.contains(&wire) {
                    return Err(CircuitError::UndefinedWire {
                        circuit: self.id.clone(),
                        gate: gate.id,
                        wire,
                    });
                }
                if inputs.contains(&wire) {
                    read_inputs.insert(wire);
                }
            }

            if !defined.insert(gate.id) {
                return Err(CircuitError::DuplicateGateOutput {
                    circuit: self.id.clone(),
                    wire: gate.id,
                });
            }
        }

        if read_inputs.len() != inputs.len() {
            return Err(CircuitError::InputArityMismatch {
                circuit: self.id.clone(),
                declared: inputs.len(),
                actual: read_inputs.len(),
            });
        }

        for &wire in &self.out {
            if !defined.contains(&wire) {
                return Err(CircuitError::UndrivenOutput {
                    circuit: self.id.clone(),
                    wire,
                });
            }
        }

        Ok(())
    }
}

/// Garbled truth tables, keyed by gate output wire.
///
/// The rows are opaque ciphertexts. Only the garbling scheme and the
/// evaluator know how to read them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarbledTables(IndexMap<WireId, Vec<Vec<u8>>>);

impl GarbledTables {
    /// Creates an empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the rows for the gate driving `gate`.
    pub fn insert(&mut self, gate: WireId, rows: Vec<Vec<u8>>) {
        self.0.insert(gate, rows);
    }

    /// Returns the rows for the gate driving `gate`.
    pub fn get(&self, gate: WireId) -> Option<&[Vec<u8>]> {
        self.0.get(&gate).map(Vec::as_slice)
    }

    /// Number of garbled gates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no garbled gates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A garbled circuit as held by the garbler.
///
/// Besides the public parts this carries the secret per-wire key pairs and
/// permutation bits. It is validated once in [`GarbledCircuit::new`] and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct GarbledCircuit {
    topology: CircuitTopology,
    tables: GarbledTables,
    pbits: IndexMap<WireId, bool>,
    keys: IndexMap<WireId, WireKeyPair>,
}

impl GarbledCircuit {
    /// Assembles a garbled circuit, checking every invariant the driver relies
    /// on before anything is built from it.
    pub fn new(
        topology: CircuitTopology,
        tables: GarbledTables,
        pbits: IndexMap<WireId, bool>,
        keys: IndexMap<WireId, WireKeyPair>,
    ) -> Result<Self, CircuitError> {
        topology.validate()?;

        let need = topology.input_count();
        if pbits.len() < need {
            return Err(CircuitError::InsufficientPermutationBits {
                circuit: topology.id.clone(),
                have: pbits.len(),
                need,
            });
        }

        for &wire in topology.alice.iter().chain(&topology.bob) {
            if !pbits.contains_key(&wire) {
                return Err(CircuitError::MissingPermutationBit {
                    circuit: topology.id.clone(),
                    wire,
                });
            }
            if !keys.contains_key(&wire) {
                return Err(CircuitError::MissingKeyPair {
                    circuit: topology.id.clone(),
                    wire,
                });
            }
        }

        for &wire in &topology.out {
            if !pbits.contains_key(&wire) {
                return Err(CircuitError::MissingPermutationBit {
                    circuit: topology.id.clone(),
                    wire,
                });
            }
        }

        Ok(Self {
            topology,
            tables,
            pbits,
            keys,
        })
    }

    /// Circuit identifier.
    pub fn id(&self) -> &str {
        &self.topology.id
    }

    /// Public circuit structure.
    pub fn topology(&self) -> &CircuitTopology {
        &self.topology
    }

    /// Garbler-owned input wires, in input-vector order.
    pub fn alice(&self) -> &[WireId] {
        &self.topology.alice
    }

    /// Evaluator-owned input wires.
    pub fn bob(&self) -> &[WireId] {
        &self.topology.bob
    }

    /// Output wires, most significant first.
    pub fn outputs(&self) -> &[WireId] {
        &self.topology.out
    }

    /// Garbled tables.
    pub fn tables(&self) -> &GarbledTables {
        &self.tables
    }

    /// Permutation bit assigned to `wire` during garbling.
    pub fn permutation_bit(&self, wire: WireId) -> Option<bool> {
        self.pbits.get(&wire).copied()
    }

    /// Key pair of `wire`.
    pub fn key_pair(&self, wire: WireId) -> Option<&WireKeyPair> {
        self.keys.get(&wire)
    }

    /// Permutation bits of the output wires, in output order.
    pub fn output_permutation_bits(&self) -> IndexMap<WireId, bool> {
        self.topology
            .out
            .iter()
            .filter_map(|&w| self.pbits.get(&w).map(|&p| (w, p)))
            .collect()
    }
}

/// What the garbler sends to the evaluator for one circuit.
///
/// Carries no key pairs and no input-wire permutation bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPackage {
    /// Circuit structure.
    pub circuit: CircuitTopology,
    /// Garbled truth tables.
    pub garbled_tables: GarbledTables,
    /// Permutation bits of the output wires, used to decode results.
    pub pbits_out: IndexMap<WireId, bool>,
}
