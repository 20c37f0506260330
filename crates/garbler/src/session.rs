//! The garbler protocol driver.

use std::io::Write;

use tracing::{debug, info, instrument, trace, warn};
use yao_types::traits::{CircuitSource, CommunicationChannel, ObliviousTransferChannel};
use yao_types::{
    AliceEntries, BobOptionTable, EvaluationResult, GarbledCircuit, PrivateInputVector,
    PublicPackage,
};

use crate::{
    CircuitOutcome, Evaluation, FailurePolicy, GarblerConfig, GarblerError, GarblerRole, Mode,
    Reporter, RoleStrategy, SessionReport, TruthTableRow, check_output_width, combinations,
    decode_output, output_bits,
};

/// Drives the garbler's side of the protocol over a sequence of circuits.
///
/// Strictly sequential: a circuit is sent and acknowledged before any OT round
/// runs on it, and each OT round completes before the next one starts.
#[derive(Debug)]
pub struct GarblerSession<C, O, W, R = GarblerRole> {
    role: R,
    channel: C,
    ot: O,
    reporter: Reporter<W>,
    config: GarblerConfig,
    /// The package the evaluator last acknowledged.
    acknowledged: Option<PublicPackage>,
}

impl<C, O, W> GarblerSession<C, O, W, GarblerRole>
where
    C: CommunicationChannel,
    O: ObliviousTransferChannel,
    W: Write,
{
    /// Creates a garbler session reporting to `sink`.
    pub fn new(channel: C, ot: O, sink: W, config: GarblerConfig) -> Self {
        Self::with_role(GarblerRole, channel, ot, sink, config)
    }
}

impl<C, O, W, R> GarblerSession<C, O, W, R>
where
    C: CommunicationChannel,
    O: ObliviousTransferChannel,
    W: Write,
    R: RoleStrategy,
{
    /// Creates a session with an explicit role strategy.
    pub fn with_role(role: R, channel: C, ot: O, sink: W, config: GarblerConfig) -> Self {
        Self {
            role,
            channel,
            ot,
            reporter: Reporter::new(sink),
            config,
            acknowledged: None,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &GarblerConfig {
        &self.config
    }

    /// Borrows the report sink.
    pub fn sink(&self) -> &W {
        self.reporter.get_ref()
    }

    /// Tears the session down into its channel, OT channel and sink.
    pub fn into_parts(self) -> (C, O, W) {
        (self.channel, self.ot, self.reporter.into_inner())
    }

    /// Runs the configured mode on every circuit of `source`.
    ///
    /// With [`FailurePolicy::Abort`] the first failing circuit ends the
    /// session with its error. With [`FailurePolicy::SkipCircuit`] the error
    /// is recorded in the report and the session moves on. A failing source
    /// always ends the session.
    ///
    /// Each circuit is checked against the configuration just before it is
    /// sent, so under `Abort` earlier circuits may already have been
    /// evaluated when a later one fails. Call [`Self::preflight`] first to
    /// reject the whole batch before anything reaches the evaluator.
    #[instrument(level = "debug", skip_all, err)]
    pub fn run_session<S: CircuitSource>(
        &mut self,
        source: &mut S,
    ) -> Result<SessionReport, GarblerError> {
        let mut report = SessionReport::default();

        while let Some(circuit) = source
            .next_circuit()
            .map_err(|e| GarblerError::Source(Box::new(e)))?
        {
            let result = match self.process_circuit(&circuit) {
                Ok(evaluation) => {
                    if let Evaluation::Value(value) = &evaluation {
                        report.results.record(*value);
                    }
                    Ok(evaluation)
                }
                Err(err) if self.config.failure_policy == FailurePolicy::Abort => return Err(err),
                Err(err) => {
                    warn!(circuit = circuit.id(), error = %err, "skipping circuit");
                    Err(err)
                }
            };

            report.outcomes.push(CircuitOutcome {
                circuit: circuit.id().to_owned(),
                result,
            });
        }

        Ok(report)
    }

    /// Runs every local check of the configured mode over `circuits` without
    /// contacting the evaluator.
    pub fn preflight<'a>(
        &self,
        circuits: impl IntoIterator<Item = &'a GarbledCircuit>,
    ) -> Result<(), GarblerError> {
        circuits
            .into_iter()
            .try_for_each(|circuit| self.check_local(circuit))
    }

    fn check_local(&self, circuit: &GarbledCircuit) -> Result<(), GarblerError> {
        match &self.config.mode {
            Mode::TruthTable => self.check_enumerable(circuit),
            Mode::SingleInput(input) => {
                check_input_size(circuit, input)?;
                check_output_width(circuit)
            }
        }
    }

    fn process_circuit(&mut self, circuit: &GarbledCircuit) -> Result<Evaluation, GarblerError> {
        // Everything that can be checked locally is checked before the
        // evaluator hears about the circuit.
        self.check_local(circuit)?;
        self.send_circuit(circuit)?;

        match self.config.mode.clone() {
            Mode::TruthTable => self.enumerate(circuit).map(Evaluation::TruthTable),
            Mode::SingleInput(input) => self
                .evaluate_single(circuit, &input)
                .map(Evaluation::Value),
        }
    }

    /// Sends the public package of `circuit` and waits for the acknowledgement.
    #[instrument(level = "debug", skip_all, fields(circuit = circuit.id()), err)]
    pub fn send_circuit(&mut self, circuit: &GarbledCircuit) -> Result<(), GarblerError> {
        let package = self.role.build_public_package(circuit);
        debug!(gates = package.garbled_tables.len(), "sending circuit");

        self.acknowledged = None;
        self.channel
            .send_and_wait(&package)
            .map_err(|e| GarblerError::ChannelFailure {
                circuit: circuit.id().to_owned(),
                source: Box::new(e),
            })?;
        self.acknowledged = Some(package);

        debug!("circuit acknowledged");
        Ok(())
    }

    /// Runs one OT round per input combination and reports the truth table.
    ///
    /// The Bob column assumes the evaluator walks its inputs in the same
    /// order. Only the outputs come from the evaluator.
    #[instrument(level = "debug", skip_all, fields(circuit = circuit.id()), err)]
    pub fn enumerate(
        &mut self,
        circuit: &GarbledCircuit,
    ) -> Result<Vec<TruthTableRow>, GarblerError> {
        self.ensure_sent(circuit)?;
        self.check_enumerable(circuit)?;

        let n_alice = circuit.alice().len();
        let width = circuit.topology().input_count();

        // Offers both options, so one table covers every combination.
        let bob = self.role.build_peer_options(circuit)?;

        self.reporter.circuit_header(circuit.id())?;
        let mut rows = Vec::new();
        for bits in combinations(width) {
            let (alice_bits, bob_bits) = bits.split_at(n_alice);
            let alice = self.role.build_own_key_entries(circuit, alice_bits)?;
            let result = self.exchange(circuit, &alice, &bob)?;

            let row = TruthTableRow {
                alice: alice_bits.to_bitvec(),
                bob: bob_bits.to_bitvec(),
                outputs: output_bits(circuit, &result)?,
            };
            trace!(row = %row.format(circuit), "truth table row");

            self.reporter.row(circuit, &row)?;
            rows.push(row);
        }
        self.reporter.table_end()?;

        Ok(rows)
    }

    /// Evaluates the circuit on the garbler's private input and returns the
    /// decoded integer output.
    #[instrument(level = "debug", skip_all, fields(circuit = circuit.id()), err)]
    pub fn evaluate_single(
        &mut self,
        circuit: &GarbledCircuit,
        input: &PrivateInputVector,
    ) -> Result<u64, GarblerError> {
        self.ensure_sent(circuit)?;
        check_input_size(circuit, input)?;
        check_output_width(circuit)?;

        let alice = self.role.build_own_key_entries(circuit, input.as_bitslice())?;
        let bob = self.role.build_peer_options(circuit)?;
        let result = self.exchange(circuit, &alice, &bob)?;
        let value = decode_output(circuit, &result)?;

        info!(value, "computed result");
        self.reporter.result(value)?;
        Ok(value)
    }

    fn exchange(
        &mut self,
        circuit: &GarbledCircuit,
        alice: &AliceEntries,
        bob: &BobOptionTable,
    ) -> Result<EvaluationResult, GarblerError> {
        self.ot
            .exchange(alice, bob)
            .map_err(|e| GarblerError::OtFailure {
                circuit: circuit.id().to_owned(),
                source: Box::new(e),
            })
    }

    /// Fails unless the evaluator holds exactly this circuit's package. Ids
    /// alone are not enough, two garblings of one topology share an id.
    fn ensure_sent(&self, circuit: &GarbledCircuit) -> Result<(), GarblerError> {
        let held = self.acknowledged.as_ref().is_some_and(|sent| {
            sent.circuit == *circuit.topology()
                && sent.garbled_tables == *circuit.tables()
                && sent.pbits_out == circuit.output_permutation_bits()
        });
        if !held {
            return Err(GarblerError::NotSent {
                circuit: circuit.id().to_owned(),
            });
        }
        Ok(())
    }

    fn check_enumerable(&self, circuit: &GarbledCircuit) -> Result<(), GarblerError> {
        let inputs = circuit.topology().input_count();
        let limit = self.config.enumeration_limit();
        if inputs > limit {
            return Err(GarblerError::EnumerationTooLarge {
                circuit: circuit.id().to_owned(),
                inputs,
                limit,
            });
        }
        Ok(())
    }
}

fn check_input_size(
    circuit: &GarbledCircuit,
    input: &PrivateInputVector,
) -> Result<(), GarblerError> {
    let expected = circuit.alice().len();
    if input.len() != expected {
        return Err(GarblerError::PrivateInputSizeMismatch {
            expected,
            actual: input.len(),
        });
    }
    Ok(())
}
