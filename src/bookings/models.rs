//! Booking Models

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{bookings::errors::BookingsServiceError, cart::CartItem, prices::line_total};

/// Lifecycle state of a booking.
///
/// Bookings are created `Confirmed` and may only move to `Cancelled`, which is
/// terminal. `Pending` is reserved for a payment-pending flow and is never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Paid for and active.
    Confirmed,

    /// Reserved; awaiting payment.
    Pending,

    /// Cancelled by the user. Kept for history.
    Cancelled,
}

impl BookingStatus {
    /// Whether moving from `self` to `next` is a valid transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Confirmed, Self::Cancelled))
    }

    /// Lowercase name as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed ticket purchase for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking id.
    pub id: String,

    /// Catalog id of the booked event.
    pub event_id: String,

    /// Event title at checkout.
    pub event_title: String,

    /// User that made the booking.
    pub user_id: String,

    /// Number of tickets.
    pub quantity: u32,

    /// Unit price times quantity, fixed at checkout.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,

    /// When the booking was made.
    pub booking_date: Timestamp,

    /// Current lifecycle state.
    pub status: BookingStatus,
}

impl Booking {
    /// Build a confirmed booking from a cart line.
    ///
    /// # Errors
    ///
    /// - [`BookingsServiceError::InvalidQuantity`]: the line holds no tickets.
    /// - [`BookingsServiceError::Price`]: the line's price cannot be turned into a total.
    pub fn from_cart_item(
        item: &CartItem,
        id: String,
        user_id: &str,
        booked_at: Timestamp,
    ) -> Result<Self, BookingsServiceError> {
        if item.quantity == 0 {
            return Err(BookingsServiceError::InvalidQuantity {
                event_id: item.event_id.clone(),
            });
        }

        let total_price =
            line_total(&item.price, item.quantity).map_err(|source| BookingsServiceError::Price {
                event_id: item.event_id.clone(),
                source,
            })?;

        Ok(Self {
            id,
            event_id: item.event_id.clone(),
            event_title: item.event_title.clone(),
            user_id: user_id.to_string(),
            quantity: item.quantity,
            total_price,
            booking_date: booked_at,
            status: BookingStatus::Confirmed,
        })
    }

    /// Whether the booking has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Move to `Cancelled` if allowed. Returns whether the status changed.
    pub(crate) fn cancel(&mut self) -> bool {
        if !self.status.can_transition_to(BookingStatus::Cancelled) {
            return false;
        }

        self.status = BookingStatus::Cancelled;

        true
    }
}
