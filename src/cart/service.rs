//! Cart service.

use mockall::automock;
use tracing::{debug, info};

use crate::{
    cart::{
        errors::CartServiceError,
        models::{CartChange, CartItem, CartUpdate},
    },
    prices::parse_price,
    store::{JsonStore, StoreKey},
};

/// Cart persisted under the `cart` store key.
#[derive(Debug, Clone)]
pub struct StoreCartService {
    store: JsonStore,
}

impl StoreCartService {
    /// Create a cart service over the given store.
    #[must_use]
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    fn save(&self, cart: &[CartItem]) -> Result<(), CartServiceError> {
        self.store.write(StoreKey::Cart, cart)?;

        Ok(())
    }
}

impl CartService for StoreCartService {
    fn get_cart(&self) -> Vec<CartItem> {
        self.store.read(StoreKey::Cart)
    }

    fn add_to_cart(&self, item: CartItem) -> Result<CartUpdate, CartServiceError> {
        if item.quantity == 0 {
            return Err(CartServiceError::InvalidQuantity {
                event_id: item.event_id,
            });
        }

        if let Err(source) = parse_price(&item.price) {
            return Err(CartServiceError::Price {
                event_id: item.event_id,
                source,
            });
        }

        let mut cart = self.get_cart();
        let event_id = item.event_id.clone();
        let added = item.quantity;

        let change = if let Some(line) = cart.iter_mut().find(|line| line.event_id == event_id) {
            line.quantity = line.quantity.saturating_add(added);
            CartChange::QuantityUpdated
        } else {
            cart.push(item);
            CartChange::Added
        };

        self.save(&cart)?;

        info!(%event_id, quantity = added, ?change, "cart item added");

        Ok(CartUpdate { cart, change })
    }

    fn update_quantity(
        &self,
        event_id: &str,
        quantity: u32,
    ) -> Result<Vec<CartItem>, CartServiceError> {
        if quantity < 1 {
            return self.remove_from_cart(event_id);
        }

        let mut cart = self.get_cart();

        let Some(line) = cart.iter_mut().find(|line| line.event_id == event_id) else {
            debug!(%event_id, "quantity update for item not in cart");
            return Ok(cart);
        };

        line.quantity = quantity;

        self.save(&cart)?;

        info!(%event_id, quantity, "cart quantity updated");

        Ok(cart)
    }

    fn remove_from_cart(&self, event_id: &str) -> Result<Vec<CartItem>, CartServiceError> {
        let mut cart = self.get_cart();
        let before = cart.len();

        cart.retain(|line| line.event_id != event_id);

        if cart.len() == before {
            debug!(%event_id, "removal of item not in cart");
            return Ok(cart);
        }

        self.save(&cart)?;

        info!(%event_id, "cart item removed");

        Ok(cart)
    }

    fn clear_cart(&self) -> Result<Vec<CartItem>, CartServiceError> {
        self.store.clear(StoreKey::Cart)?;

        info!("cart cleared");

        Ok(Vec::new())
    }
}

/// Operations on the in-progress ticket selection.
#[automock]
pub trait CartService: Send + Sync {
    /// Current cart in insertion order. A missing or corrupt cart reads as empty.
    fn get_cart(&self) -> Vec<CartItem>;

    /// Add an item, merging into the existing line for the same event.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is zero, the price has no amount, or the cart
    /// cannot be saved.
    fn add_to_cart(&self, item: CartItem) -> Result<CartUpdate, CartServiceError>;

    /// Replace the quantity for an event. A quantity below one removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    fn update_quantity(
        &self,
        event_id: &str,
        quantity: u32,
    ) -> Result<Vec<CartItem>, CartServiceError>;

    /// Remove the line for an event, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    fn remove_from_cart(&self, event_id: &str) -> Result<Vec<CartItem>, CartServiceError>;

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be removed.
    fn clear_cart(&self) -> Result<Vec<CartItem>, CartServiceError>;
}
