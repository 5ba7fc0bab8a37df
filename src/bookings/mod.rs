//! Bookings

pub mod errors;
mod ids;
pub mod models;
pub mod service;

pub use errors::BookingsServiceError;
pub use ids::{BOOKING_ID_PREFIX, generate_booking_id};
pub use models::{Booking, BookingStatus};
pub use service::*;
