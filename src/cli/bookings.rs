use std::io;

use clap::{Args, Subcommand};
use eventiverse::context::AppContext;

use crate::cli::{CliError, render};

#[derive(Debug, Args)]
pub(crate) struct BookingsCommand {
    #[command(subcommand)]
    command: BookingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum BookingsSubcommand {
    /// List bookings for the current user, or for one event
    List {
        /// Only bookings for this event, from any user
        #[arg(long)]
        event: Option<String>,

        /// Every stored booking
        #[arg(long, conflicts_with = "event")]
        all: bool,
    },

    /// Show one booking
    Show {
        /// Booking id
        id: String,
    },

    /// Cancel a confirmed booking
    Cancel {
        /// Booking id
        id: String,
    },
}

pub(crate) fn run(
    command: BookingsCommand,
    app: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command.command {
        BookingsSubcommand::List { event, all } => {
            let bookings = match event {
                Some(event_id) => app.bookings.get_bookings_for_event(&event_id),
                None if all => app.bookings.get_bookings(),
                None => app.my_bookings(),
            };

            render::bookings(out, app, &bookings)
        }
        BookingsSubcommand::Show { id } => {
            let booking = app
                .bookings
                .get_booking(&id)
                .ok_or(CliError::BookingNotFound(id))?;

            render::booking_details(out, app, &booking)
        }
        BookingsSubcommand::Cancel { id } => {
            // The service treats unknown ids as a no-op; the command reports them.
            if app.bookings.get_booking(&id).is_none() {
                return Err(CliError::BookingNotFound(id));
            }

            app.cancel_booking(&id)?;

            Ok(())
        }
    }
}
