//! Bookings service errors.

use thiserror::Error;

use crate::{
    bookings::models::Booking, cart::CartServiceError, prices::PriceError, store::StoreError,
};

/// Errors returned by booking operations.
#[derive(Debug, Error)]
pub enum BookingsServiceError {
    /// Checkout was attempted with nothing in the cart.
    #[error("your cart is empty")]
    EmptyCart,

    /// A cart line holds no tickets.
    #[error("cart line for {event_id} has a quantity of zero")]
    InvalidQuantity {
        /// Event the cart line refers to.
        event_id: String,
    },

    /// A cart line's price has no usable amount.
    #[error("invalid price for {event_id}")]
    Price {
        /// Event the cart line refers to.
        event_id: String,

        /// Parsing failure.
        #[source]
        source: PriceError,
    },

    /// The booking list could not be read or persisted; the cart was left untouched.
    #[error("failed to access bookings")]
    Store(#[from] StoreError),

    /// Bookings were saved, but the cart still holds the purchased items.
    #[error("bookings were saved but the cart could not be cleared")]
    CartNotCleared {
        /// The bookings that were persisted.
        bookings: Vec<Booking>,

        /// Why clearing failed.
        #[source]
        source: CartServiceError,
    },
}
