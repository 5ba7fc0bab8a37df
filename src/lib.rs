//! Eventiverse
//!
//! Client-side core of the Eventiverse event ticketing app: a cart of ticket selections,
//! checkout into bookings, a mock session, all persisted as JSON in a key-value store.

pub mod bookings;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod context;
pub mod notifier;
pub mod observability;
pub mod prelude;
pub mod prices;
pub mod session;
pub mod store;
