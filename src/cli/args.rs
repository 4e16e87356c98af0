use crate::core::PipelineSpec;
use crate::strategy::StrategyKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "func_chain_perf")]
#[command(about = "Compare decorator chains against closure chains for numeric pipelines")]
#[command(version)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Transform, Create and Amortized comparisons
    Run(RunArgs),

    /// Evaluate a pipeline on one input and check that all strategies agree
    Eval {
        /// Pipeline stages, innermost first (e.g. "add:16,mul:60,add:5")
        #[arg(default_value = "add:16,mul:60,add:5")]
        pipeline: PipelineSpec,

        /// Input value
        #[arg(short, long, default_value = "50", allow_negative_numbers = true)]
        input: f64,

        /// Evaluate with a single strategy only
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyKind>,
    },

    /// List configuration presets
    Presets,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Configuration preset (default, quick, thorough)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// JSON configuration file (takes precedence over --preset)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Iterations per Transform/Create measurement
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Input value
    #[arg(long, allow_negative_numbers = true)]
    pub input: Option<f64>,

    /// Pipeline used by the Amortized group
    #[arg(long)]
    pub pipeline: Option<PipelineSpec>,

    /// Number of inputs evaluated by the Amortized group
    #[arg(long)]
    pub amortized_inputs: Option<usize>,

    /// Write a JSON report to this path
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}
