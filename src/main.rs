//! BeeShop CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[expect(
    clippy::print_stderr,
    reason = "errors are reported on stderr before logging may be up."
)]
fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = beeshop::observability::init_logging(&cli.config.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");

            ExitCode::FAILURE
        }
    }
}
