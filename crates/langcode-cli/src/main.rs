#![forbid(unsafe_code)]

mod cli;
mod command_convert;
mod command_parse;
mod command_schemes;
mod config;
mod error;

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("langcode=info,langcode_core=info")),
        )
        .init();

    match cli::run() {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(cli::CliAppError::Usage(usage)) => {
            eprintln!("{usage}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("{}", cli::failure_message(&err));
            ExitCode::FAILURE
        }
    }
}
