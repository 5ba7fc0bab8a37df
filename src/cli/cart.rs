use std::io;

use clap::{Args, Subcommand};
use eventiverse::context::AppContext;

use crate::cli::{CliError, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show,

    /// Add tickets for an event
    Add {
        /// Event id
        event: String,

        /// Number of tickets
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
        quantity: u32,
    },

    /// Set the ticket count for an event; 0 removes it
    Update {
        /// Event id
        event: String,

        /// New number of tickets
        quantity: u32,
    },

    /// Remove an event from the cart
    Remove {
        /// Event id
        event: String,
    },

    /// Empty the cart
    Clear,
}

pub(crate) fn run(
    command: CartCommand,
    app: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { event, quantity } => {
            app.add_event_to_cart(&event, quantity)?;
        }
        CartSubcommand::Update { event, quantity } => {
            app.update_quantity(&event, quantity)?;
        }
        CartSubcommand::Remove { event } => {
            app.remove_from_cart(&event)?;
        }
        CartSubcommand::Clear => {
            app.clear_cart()?;
        }
    }

    render::cart(out, app)
}
