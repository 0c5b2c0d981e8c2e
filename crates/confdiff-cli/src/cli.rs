use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "confdiff",
    about = "Compare two YAML configuration files structurally",
    version
)]
pub struct Cli {
    /// First file
    pub left: PathBuf,

    /// Second file
    pub right: PathBuf,

    /// ConfigMap data key to compare; `key1:key2` selects a different key per file
    pub section: Option<String>,

    /// Dot-separated path to start the comparison from, e.g. `ipo.robot`
    pub start: Option<String>,

    /// Also write an HTML report to this file
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with equivalence groups
    #[arg(long, value_name = "FILE", conflicts_with = "strict_types")]
    pub config: Option<PathBuf>,

    /// Only compare values of the same kind as equal
    #[arg(long)]
    pub strict_types: bool,

    #[arg(long)]
    pub no_color: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
