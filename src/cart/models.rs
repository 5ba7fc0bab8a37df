//! Cart Models

use serde::{Deserialize, Serialize};

/// A line in the cart: a snapshot of an event taken when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog id of the event; unique within a cart.
    pub event_id: String,

    /// Event title at add-time.
    pub event_title: String,

    /// Currency-formatted unit price at add-time, e.g. `"$149.99"`.
    pub price: String,

    /// Number of tickets, at least one.
    pub quantity: u32,

    /// Event image at add-time.
    pub image_url: String,
}

/// What `add_to_cart` did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added,

    /// An existing line's quantity was increased.
    QuantityUpdated,
}

/// Cart contents after an add, with the change that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    /// The whole cart, in insertion order.
    pub cart: Vec<CartItem>,

    /// How the added item was merged.
    pub change: CartChange,
}
