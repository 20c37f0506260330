use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Garbler side of Yao's protocol, run against an in-process evaluator
#[derive(Parser, Debug)]
#[command(name = "yaodemo")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Log filter, in `RUST_LOG` syntax
    #[arg(long, global = true, default_value = "warn", value_name = "FILTER")]
    pub(crate) log: String,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print the truth table of every circuit
    Table(TableCommand),
    /// Evaluate every circuit on one private input
    Compute(ComputeCommand),
}

#[derive(Parser, Debug)]
pub(crate) struct TableCommand {
    /// Circuit description file (JSON)
    #[arg(value_name = "CIRCUITS")]
    pub(crate) circuits: PathBuf,

    /// Largest number of inputs to enumerate
    #[arg(
        long = "max-inputs",
        default_value_t = yao_garbler::DEFAULT_MAX_ENUMERATION_INPUTS,
        value_name = "N"
    )]
    pub(crate) max_inputs: usize,

    /// Seed for garbling
    #[arg(long, default_value_t = 0, value_name = "SEED")]
    pub(crate) seed: u64,

    /// Keep going when a circuit fails
    #[arg(long = "skip-failures")]
    pub(crate) skip_failures: bool,
}

#[derive(Parser, Debug)]
pub(crate) struct ComputeCommand {
    /// Circuit description file (JSON)
    #[arg(value_name = "CIRCUITS")]
    pub(crate) circuits: PathBuf,

    /// Read the private input from a file instead of generating it
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    pub(crate) input_file: Option<PathBuf>,

    /// Private input width (defaults to the first circuit's Alice wires)
    #[arg(short = 'b', long = "bit-width", value_name = "BITS")]
    pub(crate) bit_width: Option<usize>,

    /// Evaluator input bits (defaults to all zeros)
    #[arg(long = "bob-input", value_name = "BITS")]
    pub(crate) bob_input: Option<String>,

    /// Seed for garbling and for the generated input
    #[arg(long, default_value_t = 0, value_name = "SEED")]
    pub(crate) seed: u64,

    /// Keep going when a circuit fails
    #[arg(long = "skip-failures")]
    pub(crate) skip_failures: bool,
}
