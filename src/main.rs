mod bracket;
mod cli;
mod config;
mod container;
mod driver;
mod error;
mod family;
mod input;
mod interpolate;
mod materialize;
mod store;

use std::process::ExitCode;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use config::Config;
use driver::RunOutcome;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode, Error> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.settings.config();

    let code = match &cli.command {
        Commands::Interpolate { input, offset } => {
            match command::interpolate(config, input, *offset).await {
                Ok(outcome) => report(outcome),
                Err(e) => failure(e),
            }
        }
        Commands::Resolve { input, offset } => resolve(&config, input, *offset),
    };

    Ok(code)
}

fn report(outcome: RunOutcome) -> ExitCode {
    match outcome.into_result() {
        Ok(interpolated) => {
            for line in interpolated.report_lines() {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        // Details are in the log; callers only see an empty result.
        Err(RunOutcome::Fatal(_)) => ExitCode::FAILURE,
        Err(_) => ExitCode::SUCCESS,
    }
}

fn resolve(config: &Config, input: &str, offset: usize) -> ExitCode {
    match command::resolve(config, input, offset) {
        Ok(lines) => {
            lines.iter().for_each(|line| println!("{}", line));
            ExitCode::SUCCESS
        }
        Err(e) => failure(e),
    }
}

fn failure(e: Error) -> ExitCode {
    tracing::error!("{:#}", e);
    ExitCode::FAILURE
}

// Logs go to stderr; stdout carries only the report.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::AuxError;

    #[test]
    fn should_exit_with_failure_on_unparsable_input() {
        let code = resolve(&Config::default(), "MER_RR__1P.N1", 14);
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn should_exit_with_success_on_resolvable_input() {
        let code = resolve(&Config::default(), "X20050615_180000.nc", 1);
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn should_map_outcomes_to_exit_codes() {
        assert_eq!(report(RunOutcome::Unavailable(Vec::new())), ExitCode::SUCCESS);
        assert_eq!(
            report(RunOutcome::Fatal(AuxError::InvalidInput("bad".to_string()))),
            ExitCode::FAILURE
        );
    }
}
