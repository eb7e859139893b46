use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Pipeline to run (default: `default_pipeline` from config, else relab)
    #[arg(value_name = "PIPELINE")]
    pub pipeline: Option<String>,

    /// Read this file instead of the pipeline's input
    #[arg(long, value_name = "FILE", help_heading = "Path Overrides")]
    pub input: Option<PathBuf>,

    /// Write to this file instead of the pipeline's output
    #[arg(long, value_name = "FILE", help_heading = "Path Overrides")]
    pub output: Option<PathBuf>,

    /// Append a rule after the pipeline's own rules (repeatable)
    #[arg(long = "enable", value_name = "RULE", help_heading = "Rule Selection")]
    pub enable: Vec<String>,

    /// Remove a rule from the pipeline (repeatable)
    #[arg(long = "disable", value_name = "RULE", help_heading = "Rule Selection")]
    pub disable: Vec<String>,

    /// Apply the rules without writing the output file
    #[arg(long, help_heading = "Output Options")]
    pub dry_run: bool,

    /// Path to config file (default: ./retab.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Path to config file (default: ./retab.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
