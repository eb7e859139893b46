pub mod args;
pub mod commands;

pub use args::{ListArgs, RunArgs};
use clap::{Parser, Subcommand};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

const RUN_EXAMPLES: &str = "\
Examples:
    retab run
    retab run cpm --enable vertical-bar
    retab run --input ecs.tsv --output ecs_split.csv";

const RUN_LONG_HELP: &str = "\
Examples:
    retab run
    retab run cpm --enable vertical-bar
    retab run --input ecs.tsv --output ecs_split.csv

Environment:
    RETAB_DEFAULT_PIPELINE  Pipeline used when no name is given (default: relab)
    RETAB_LOG_LEVEL         Tracing level when RUST_LOG is unset (default: info)
    RETAB_LOG_DIR           Directory for retab.log; setting it enables file logging";

#[derive(Parser)]
#[command(name = "retab")]
#[command(version = crate::VERSION)]
#[command(about = "Rewrite colon-delimited gene-family tables into tab-separated files")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: list pipelines, preview with --dry-run, then run for real."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Apply a pipeline's substitutions to its input file",
        long_about = "Run reads the whole input file, applies each rule in order, and writes the result to the output file, printing one line per finished step.",
        after_help = RUN_EXAMPLES,
        after_long_help = RUN_LONG_HELP
    )]
    Run(RunArgs),
    #[command(
        about = "List available substitution rules",
        after_help = "Example:\n    retab rules --config retab.toml"
    )]
    Rules(ListArgs),
    #[command(
        about = "List available pipelines",
        after_help = "Example:\n    retab pipelines"
    )]
    Pipelines(ListArgs),
}

impl Command {
    /// Config file passed on the command line, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Command::Run(args) => args.config.as_deref(),
            Command::Rules(args) | Command::Pipelines(args) => args.config.as_deref(),
        }
    }
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Run(run_args) => commands::run(run_args),
        Command::Rules(list_args) => commands::rules(list_args),
        Command::Pipelines(list_args) => commands::pipelines(list_args),
    }
}
