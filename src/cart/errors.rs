//! Cart service errors.

use thiserror::Error;

use crate::{prices::PriceError, store::StoreError};

/// Errors returned by cart operations. None of them leave the cart half-written.
#[derive(Debug, Error)]
pub enum CartServiceError {
    /// Items must be added with at least one ticket.
    #[error("cannot add {event_id} with a quantity of zero")]
    InvalidQuantity {
        /// Event the item refers to.
        event_id: String,
    },

    /// The item's display price has no usable amount.
    #[error("invalid price for {event_id}")]
    Price {
        /// Event the item refers to.
        event_id: String,

        /// Parsing failure.
        #[source]
        source: PriceError,
    },

    /// The updated cart could not be persisted.
    #[error("failed to save cart")]
    Store(#[from] StoreError),
}
