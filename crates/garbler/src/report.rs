//! Human-readable reporting and per-session results.

use std::io::{self, Write};

use yao_types::GarbledCircuit;

use crate::{GarblerError, TruthTableRow};

/// Writes session reports to a text sink.
#[derive(Debug)]
pub struct Reporter<W> {
    sink: W,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Opens the truth-table block for a circuit.
    pub fn circuit_header(&mut self, id: &str) -> io::Result<()> {
        writeln!(self.sink, "======== {id} ========")
    }

    /// Writes one truth-table row.
    pub fn row(&mut self, circuit: &GarbledCircuit, row: &TruthTableRow) -> io::Result<()> {
        writeln!(self.sink, "{}", row.format(circuit))
    }

    /// Closes a truth-table block with a blank line.
    pub fn table_end(&mut self) -> io::Result<()> {
        writeln!(self.sink)?;
        self.sink.flush()
    }

    /// Reports a single computed value.
    pub fn result(&mut self, value: u64) -> io::Result<()> {
        writeln!(self.sink, "Function result is {value}")?;
        self.sink.flush()
    }

    /// Borrows the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Holds the most recent single-input result.
///
/// Each new result replaces the previous one. Callers wanting a history must
/// copy values out as they arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultStore {
    latest: Option<u64>,
}

impl ResultStore {
    /// Replaces the stored result.
    pub fn record(&mut self, value: u64) {
        self.latest = Some(value);
    }

    /// The most recent result, if any circuit produced one.
    pub fn latest(&self) -> Option<u64> {
        self.latest
    }
}

/// What the driver produced for one circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Every row of the truth table.
    TruthTable(Vec<TruthTableRow>),
    /// The decoded single-input result.
    Value(u64),
}

/// Outcome of one circuit in a session.
#[derive(Debug)]
pub struct CircuitOutcome {
    /// Circuit id.
    pub circuit: String,
    /// The evaluation, or the error that ended the circuit.
    pub result: Result<Evaluation, GarblerError>,
}

/// Everything a session produced.
#[derive(Debug, Default)]
pub struct SessionReport {
    /// One outcome per circuit, in session order.
    pub outcomes: Vec<CircuitOutcome>,
    /// Most recent single-input result.
    pub results: ResultStore,
}

impl SessionReport {
    /// Shortcut for `results.latest()`.
    pub fn latest_result(&self) -> Option<u64> {
        self.results.latest()
    }

    /// Circuits that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &GarblerError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.circuit.as_str(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_store_overwrites() {
        let mut store = ResultStore::default();
        assert_eq!(store.latest(), None);

        store.record(3);
        store.record(17);
        assert_eq!(store.latest(), Some(17));
    }

    #[test]
    fn test_reporter_lines() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.circuit_header("adder").expect("write");
        reporter.table_end().expect("write");
        reporter.result(17).expect("write");

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert_eq!(text, "======== adder ========\n\nFunction result is 17\n");
    }
}
