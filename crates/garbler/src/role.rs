use bitvec::slice::BitSlice;
use yao_types::{
    AliceEntries, BobOptionTable, CircuitError, GarbledCircuit, Party, PublicPackage,
};

use crate::encoding;

/// Role-specific behaviour plugged into a [`GarblerSession`](crate::GarblerSession).
pub trait RoleStrategy {
    /// The party this strategy plays.
    fn party(&self) -> Party;

    /// Builds what is sent to the peer for `circuit`.
    fn build_public_package(&self, circuit: &GarbledCircuit) -> PublicPackage;

    /// Builds the masked entries for this party's own input wires.
    fn build_own_key_entries(
        &self,
        circuit: &GarbledCircuit,
        bits: &BitSlice,
    ) -> Result<AliceEntries, CircuitError>;

    /// Builds the OT options offered for the peer's input wires.
    fn build_peer_options(&self, circuit: &GarbledCircuit) -> Result<BobOptionTable, CircuitError>;
}

/// Strategy for the garbler.
///
/// Sends topology, garbled tables and output permutation bits. Key pairs and
/// input permutation bits stay local.
#[derive(Debug, Clone, Copy, Default)]
pub struct GarblerRole;

impl RoleStrategy for GarblerRole {
    fn party(&self) -> Party {
        Party::Alice
    }

    fn build_public_package(&self, circuit: &GarbledCircuit) -> PublicPackage {
        PublicPackage {
            circuit: circuit.topology().clone(),
            garbled_tables: circuit.tables().clone(),
            pbits_out: circuit.output_permutation_bits(),
        }
    }

    fn build_own_key_entries(
        &self,
        circuit: &GarbledCircuit,
        bits: &BitSlice,
    ) -> Result<AliceEntries, CircuitError> {
        encoding::encode_alice_inputs(circuit, bits)
    }

    fn build_peer_options(&self, circuit: &GarbledCircuit) -> Result<BobOptionTable, CircuitError> {
        encoding::bob_option_table(circuit)
    }
}
