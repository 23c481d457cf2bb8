use clap::{Args, Parser, Subcommand};
use protalign::workflows::network::NodeProperty;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Simone Chiarella",
    version,
    about = "protalign - align transformer attention patterns with residue contact maps in protein structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file in TOML format
    #[arg(short, long, global = true, value_name = "PATH", default_value = "config.toml")]
    pub config: PathBuf,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel chain processing.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute attention alignment and similarity averaged over a set of
    /// peptide chains, selected from the configuration.
    OnSet(OnSetArgs),
    /// Compute attention alignment and similarity for one peptide chain.
    OnChain(OnChainArgs),
    /// Export the residue contact network of one peptide chain with a
    /// selected residue property.
    NetViz(NetVizArgs),
}

#[derive(Args, Debug)]
pub struct OnSetArgs {
    /// Also save each chain's per-head alignment table next to the set
    /// summary.
    #[arg(short = 's', long)]
    pub save_single: bool,
}

#[derive(Args, Debug)]
pub struct OnChainArgs {
    /// Code of the input peptide chain (e.g., 1ABC)
    pub chain_code: String,
}

#[derive(Args, Debug)]
pub struct NetVizArgs {
    /// Code of the input peptide chain (e.g., 1ABC)
    pub chain_code: String,

    /// Residue property to attach to the network nodes
    #[arg(value_name = "PROPERTY")]
    pub property: NodeProperty,
}
