//! Collaborator traits for the garbler driver.
//!
//! The driver owns none of the cryptography or transport. It talks to these
//! traits, which lets the same driver run against a real network peer or
//! against the in-process fixtures used in tests.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::error::Error;

use crate::{
    AliceEntries, BobOptionTable, EvaluationResult, GarbledCircuit, Party, PrivateInputVector,
    PublicPackage,
};

/// Supplies garbled circuits in session order.
pub trait CircuitSource {
    /// Error type for whatever errors might happen.
    type Error: Error + Send + Sync + 'static;

    /// Returns the next circuit.
    ///
    /// Returns `Ok(Some(circuit))` while there are circuits left, `Ok(None)`
    /// once the session is exhausted.
    fn next_circuit(&mut self) -> Result<Option<GarbledCircuit>, Self::Error>;
}

impl CircuitSource for VecDeque<GarbledCircuit> {
    type Error = Infallible;

    fn next_circuit(&mut self) -> Result<Option<GarbledCircuit>, Self::Error> {
        Ok(self.pop_front())
    }
}

impl CircuitSource for std::vec::IntoIter<GarbledCircuit> {
    type Error = Infallible;

    fn next_circuit(&mut self) -> Result<Option<GarbledCircuit>, Self::Error> {
        Ok(self.next())
    }
}

/// Synchronous transport to the evaluator.
pub trait CommunicationChannel {
    /// Error type for send or acknowledgement failures.
    type Error: Error + Send + Sync + 'static;

    /// Sends the public package and blocks until the peer acknowledges it.
    fn send_and_wait(&mut self, package: &PublicPackage) -> Result<(), Self::Error>;
}

/// 1-out-of-2 oblivious transfer with the evaluator.
pub trait ObliviousTransferChannel {
    /// Error type for failed exchanges.
    type Error: Error + Send + Sync + 'static;

    /// Hands over the garbler's own masked entries and offers both options
    /// for every evaluator wire.
    ///
    /// The evaluator picks one option per wire without the garbler learning
    /// which, evaluates the circuit, and reports the decoded output bits.
    fn exchange(
        &mut self,
        alice: &AliceEntries,
        bob: &BobOptionTable,
    ) -> Result<EvaluationResult, Self::Error>;
}

/// Source of a party's private input bits.
pub trait PrivateInputProvider {
    /// Error type for unavailable or unreadable inputs.
    type Error: Error + Send + Sync + 'static;

    /// Returns `bit_width` input bits for `party`.
    fn get_vector(
        &mut self,
        party: Party,
        bit_width: usize,
    ) -> Result<PrivateInputVector, Self::Error>;
}
