use std::io;

use clap::{Parser, Subcommand};
use eventiverse::{
    config::{AppConfig, load_dotenv},
    context::{AppContext, AppError},
};
use thiserror::Error;

mod bookings;
mod cart;
mod events;
mod notifier;
mod render;
mod session;

pub(crate) use notifier::ConsoleNotifier;

#[derive(Debug, Parser)]
#[command(name = "eventiverse", about = "Eventiverse ticketing client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the event catalog
    Events(events::EventsCommand),

    /// Inspect and edit the cart
    Cart(cart::CartCommand),

    /// Book everything in the cart
    Checkout,

    /// Booking history
    Bookings(bookings::BookingsCommand),

    /// Sign in to an existing account
    Signin(session::SignInArgs),

    /// Create an account and sign in
    Signup(session::SignUpArgs),

    /// End the current session
    Signout,

    /// Show the signed-in user
    Whoami,

    /// Update the signed-in user's profile
    Profile(session::ProfileArgs),
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("event {0} not found")]
    EventNotFound(String),

    #[error("booking {0} not found")]
    BookingNotFound(String),

    #[error("nothing to update; pass --name, --email or --avatar")]
    EmptyProfileUpdate,

    #[error("cannot total cart: {0}")]
    Totals(#[source] AppError),

    #[error("failed to write output")]
    Io(#[from] io::Error),
}

impl Cli {
    /// Parse flags and environment, after loading `.env`.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        load_dotenv();

        Self::try_parse()
    }

    pub(crate) fn run(self, app: &mut AppContext, out: &mut impl io::Write) -> Result<(), CliError> {
        match self.command {
            Commands::Events(command) => events::run(command, app, out),
            Commands::Cart(command) => cart::run(command, app, out),
            Commands::Checkout => {
                let created = app.checkout()?;

                render::bookings(out, app, &created)
            }
            Commands::Bookings(command) => bookings::run(command, app, out),
            Commands::Signin(args) => session::sign_in(args, app, out),
            Commands::Signup(args) => session::sign_up(args, app, out),
            Commands::Signout => {
                app.sign_out();

                Ok(())
            }
            Commands::Whoami => session::whoami(app, out),
            Commands::Profile(args) => session::update_profile(args, app, out),
        }
    }
}
