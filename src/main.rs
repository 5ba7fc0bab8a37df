//! Eventiverse command-line client

use std::{fmt, io, process::ExitCode, sync::Arc};

use eventiverse::{context::AppContext, observability::init_subscriber};
use tracing::{debug, error};

use crate::cli::{Cli, CliError, ConsoleNotifier};

mod cli;

fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => return clap_exit(&error),
    };

    if let Err(error) = init_subscriber(&cli.config.logging) {
        report(&error);
        return ExitCode::FAILURE;
    }

    let mut app = match AppContext::from_config(&cli.config, Arc::new(ConsoleNotifier::default())) {
        Ok(app) => app,
        Err(error) => {
            error!(%error, "failed to start");
            report(&error);
            return ExitCode::FAILURE;
        }
    };

    match cli.run(&mut app, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        // Already shown through the notifier
        Err(CliError::App(error)) => {
            debug!(%error, "command failed");
            ExitCode::FAILURE
        }
        Err(error) => {
            error!(%error, "command failed");
            report(&error);
            ExitCode::FAILURE
        }
    }
}

/// `--help` and `--version` also arrive here as errors.
fn clap_exit(error: &clap::Error) -> ExitCode {
    if error.print().is_err() {
        return ExitCode::FAILURE;
    }

    if error.use_stderr() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn report(error: &dyn fmt::Display) {
    #[expect(
        clippy::print_stderr,
        reason = "logging may not be initialized, must use eprintln for startup errors"
    )]
    {
        eprintln!("eventiverse: {error}");
    }
}
