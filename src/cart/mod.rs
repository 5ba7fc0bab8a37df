//! Cart

pub mod errors;
pub mod models;
pub mod service;
mod totals;

pub use errors::CartServiceError;
pub use models::{CartChange, CartItem, CartUpdate};
pub use service::*;
pub use totals::{CartTotals, compute_totals, item_count};
