use std::io;

use clap::{Args, Subcommand};
use eventiverse::context::AppContext;

use crate::cli::{CliError, render};

#[derive(Debug, Args)]
pub(crate) struct EventsCommand {
    #[command(subcommand)]
    command: EventsSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventsSubcommand {
    /// List every event
    List,

    /// Show one event in detail
    Show {
        /// Event id
        id: String,
    },
}

pub(crate) fn run(
    command: EventsCommand,
    app: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command.command {
        EventsSubcommand::List => render::events(out, &app.catalog.events()),
        EventsSubcommand::Show { id } => {
            let event = app
                .catalog
                .find_event(&id)
                .ok_or(CliError::EventNotFound(id))?;

            render::event_details(out, &event)
        }
    }
}
