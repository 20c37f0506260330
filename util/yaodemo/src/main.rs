//! Demo driver for the garbler.

mod cli;

use std::io;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use yao_fixtures::{BobInput, CircuitFile, LocalEvaluator, load_circuit_file};
use yao_garbler::input::{FileInput, RandomInput, load_private_input};
use yao_garbler::{FailurePolicy, GarblerConfig, GarblerSession, SessionReport};
use yao_types::{GarbledCircuit, PrivateInputVector};

use crate::cli::{Cli, Command, ComputeCommand, TableCommand};

fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).context("invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Table(cmd) => run_table(cmd),
        Command::Compute(cmd) => run_compute(cmd),
    }
}

fn run_table(cmd: TableCommand) -> Result<()> {
    let (file, circuits) = load_and_garble(&cmd.circuits, cmd.seed)?;
    info!(name = %file.name, circuits = circuits.len(), "enumerating truth tables");

    let config = GarblerConfig::truth_table()
        .with_max_enumeration_inputs(cmd.max_inputs)
        .with_failure_policy(policy(cmd.skip_failures));
    run(circuits, BobInput::Enumerate, config)?;
    Ok(())
}

fn run_compute(cmd: ComputeCommand) -> Result<()> {
    let (file, circuits) = load_and_garble(&cmd.circuits, cmd.seed)?;
    let Some(first) = circuits.first() else {
        bail!("circuit file {} has no circuits", file.name);
    };

    let bit_width = cmd.bit_width.unwrap_or(first.alice().len());
    let input = match &cmd.input_file {
        Some(path) => load_private_input(&mut FileInput::new(path), bit_width)?,
        None => load_private_input(&mut RandomInput::from_seed(cmd.seed), bit_width)?,
    };

    let bob = match &cmd.bob_input {
        Some(bits) => bits.parse().context("invalid --bob-input")?,
        None => PrivateInputVector::from_bools(&vec![false; first.bob().len()]),
    };

    let config = GarblerConfig::single_input(input).with_failure_policy(policy(cmd.skip_failures));
    let report = run(circuits, BobInput::Fixed(bob), config)?;
    if let Some(value) = report.latest_result() {
        info!(value, "latest result");
    }
    Ok(())
}

fn load_and_garble(
    path: &std::path::Path,
    seed: u64,
) -> Result<(CircuitFile, Vec<GarbledCircuit>)> {
    let file = load_circuit_file(path)?;
    let circuits = file.garble_all(&mut ChaCha20Rng::seed_from_u64(seed))?;
    Ok((file, circuits))
}

fn run(
    circuits: Vec<GarbledCircuit>,
    bob: BobInput,
    config: GarblerConfig,
) -> Result<SessionReport> {
    let evaluator = LocalEvaluator::new(bob);
    let stdout = io::stdout().lock();
    let mut session = GarblerSession::new(evaluator.clone(), evaluator, stdout, config);
    if session.config().failure_policy == FailurePolicy::Abort {
        session.preflight(&circuits)?;
    }

    let report = session.run_session(&mut circuits.into_iter())?;
    for (circuit, err) in report.failures() {
        warn!(circuit, error = %err, "circuit failed");
    }
    Ok(report)
}

fn policy(skip_failures: bool) -> FailurePolicy {
    if skip_failures {
        FailurePolicy::SkipCircuit
    } else {
        FailurePolicy::Abort
    }
}
