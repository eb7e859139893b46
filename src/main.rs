use clap::Parser;
use retab::core::{AppError, DefaultErrorReporter, ErrorReporter};
use retab::{cli, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => DefaultErrorReporter::new().report_error(app_error),
                None => eprintln!("[ERROR] {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: cli::Args) -> retab::Result<()> {
    let _guard = logging::init(&args.command)?;
    cli::run(args)
}
