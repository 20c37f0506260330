//! An in-process evaluator with ideal oblivious transfer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use yao_types::traits::{CommunicationChannel, ObliviousTransferChannel};
use yao_types::{
    AliceEntries, BobOptionTable, EvaluationResult, Label, PrivateInputVector, PublicPackage,
    WireId,
};

use crate::garble::{ROW_LEN, row_index, row_pad};

/// How the evaluator picks its own input bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BobInput {
    /// The same bits for every exchange.
    Fixed(PrivateInputVector),
    /// Follows the garbler's truth-table order: the k-th exchange after a
    /// circuit arrives uses the low bits of `k`, most significant first.
    Enumerate,
}

/// Errors raised by the [`LocalEvaluator`].
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    /// An exchange arrived before any circuit.
    #[error("no circuit has been received")]
    NoCircuit,
    /// The fixed input does not match the circuit's Bob wires.
    #[error("bob input has {actual} bits, circuit expects {expected}")]
    InputSize {
        /// Bob wires in the circuit.
        expected: usize,
        /// Bits supplied.
        actual: usize,
    },
    /// No key reached a wire the circuit reads.
    #[error("no key for wire {0}")]
    MissingKey(WireId),
    /// A gate has no input wires.
    #[error("gate {0} has no input wires")]
    MalformedGate(WireId),
    /// A gate has no usable garbled table.
    #[error("bad garbled table for gate {0}")]
    BadTable(WireId),
    /// The package has no permutation bit for an output wire.
    #[error("no output permutation bit for wire {0}")]
    MissingOutputBit(WireId),
    /// The evaluator was told to refuse circuits.
    #[error("circuit rejected")]
    Rejected,
}

#[derive(Debug)]
struct State {
    input: BobInput,
    package: Option<PublicPackage>,
    received: usize,
    exchanges: u64,
    reject: bool,
}

/// The evaluator's side of the protocol, run in-process.
///
/// Implements both [`CommunicationChannel`] and [`ObliviousTransferChannel`].
/// Clones share state, so one clone can serve as the channel and another as
/// the OT endpoint of the same session.
#[derive(Debug, Clone)]
pub struct LocalEvaluator {
    state: Rc<RefCell<State>>,
}

impl LocalEvaluator {
    /// Creates an evaluator using `input` for its own wires.
    pub fn new(input: BobInput) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                input,
                package: None,
                received: 0,
                exchanges: 0,
                reject: false,
            })),
        }
    }

    /// Makes every later `send_and_wait` fail.
    pub fn reject_circuits(&self) {
        self.state.borrow_mut().reject = true;
    }

    /// Number of circuits acknowledged so far.
    pub fn received(&self) -> usize {
        self.state.borrow().received
    }

    /// Exchanges run since the last circuit arrived.
    pub fn exchanges(&self) -> u64 {
        self.state.borrow().exchanges
    }

    /// The most recently received package.
    pub fn last_package(&self) -> Option<PublicPackage> {
        self.state.borrow().package.clone()
    }
}

impl CommunicationChannel for LocalEvaluator {
    type Error = EvaluatorError;

    fn send_and_wait(&mut self, package: &PublicPackage) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.reject {
            return Err(EvaluatorError::Rejected);
        }
        state.package = Some(package.clone());
        state.received += 1;
        state.exchanges = 0;
        Ok(())
    }
}

impl ObliviousTransferChannel for LocalEvaluator {
    type Error = EvaluatorError;

    fn exchange(
        &mut self,
        alice: &AliceEntries,
        bob: &BobOptionTable,
    ) -> Result<EvaluationResult, Self::Error> {
        let mut state = self.state.borrow_mut();
        let package = state.package.as_ref().ok_or(EvaluatorError::NoCircuit)?;
        let bob_bits = bob_bits(&state.input, package.circuit.bob.len(), state.exchanges)?;

        let mut wires: HashMap<WireId, (Label, bool)> = HashMap::new();
        for (&wire, entry) in alice {
            wires.insert(wire, (entry.key, entry.masked_bit));
        }
        for (&wire, bit) in package.circuit.bob.iter().zip(bob_bits) {
            let options = bob.get(&wire).ok_or(EvaluatorError::MissingKey(wire))?;
            let picked = options.select(bit);
            wires.insert(wire, (picked.key, picked.masked_bit));
        }

        let result = evaluate_package(package, &mut wires)?;
        state.exchanges += 1;
        Ok(result)
    }
}

fn bob_bits(input: &BobInput, width: usize, exchange: u64) -> Result<Vec<bool>, EvaluatorError> {
    match input {
        BobInput::Fixed(bits) => {
            if bits.len() != width {
                return Err(EvaluatorError::InputSize {
                    expected: width,
                    actual: bits.len(),
                });
            }
            Ok(bits.iter().collect())
        }
        BobInput::Enumerate => Ok((0..width)
            .rev()
            .map(|shift| shift < 64 && (exchange >> shift) & 1 == 1)
            .collect()),
    }
}

fn evaluate_package(
    package: &PublicPackage,
    wires: &mut HashMap<WireId, (Label, bool)>,
) -> Result<EvaluationResult, EvaluatorError> {
    let key = |wires: &HashMap<WireId, (Label, bool)>, w: WireId| {
        wires.get(&w).copied().ok_or(EvaluatorError::MissingKey(w))
    };

    for gate in &package.circuit.gates {
        let first = gate
            .inputs
            .first()
            .copied()
            .ok_or(EvaluatorError::MalformedGate(gate.id))?;
        let (ka, ma) = key(wires, first)?;
        let (kb, mb) = match gate.inputs.get(1) {
            Some(&b) => {
                let (kb, mb) = key(wires, b)?;
                (Some(kb), Some(mb))
            }
            None => (None, None),
        };

        let row = row_index(ma, mb);
        let cipher = package
            .garbled_tables
            .get(gate.id)
            .and_then(|rows| rows.get(row))
            .filter(|r| r.len() == ROW_LEN)
            .ok_or(EvaluatorError::BadTable(gate.id))?;

        let pad = row_pad(gate.id, row, &ka, kb.as_ref());
        let mut plain = [0u8; ROW_LEN];
        for ((p, c), k) in plain.iter_mut().zip(cipher).zip(pad) {
            *p = c ^ k;
        }

        let mut out_key = [0u8; 16];
        out_key.copy_from_slice(&plain[..16]);
        wires.insert(gate.id, (Label(out_key), plain[16] & 1 == 1));
    }

    package
        .circuit
        .out
        .iter()
        .map(|&wire| {
            let (_, masked) = key(wires, wire)?;
            let p = package
                .pbits_out
                .get(&wire)
                .ok_or(EvaluatorError::MissingOutputBit(wire))?;
            Ok((wire, masked ^ p))
        })
        .collect()
}
