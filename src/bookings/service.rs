//! Bookings service.

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::{debug, error, info};

use crate::{
    bookings::{
        errors::BookingsServiceError,
        ids::generate_booking_id,
        models::Booking,
    },
    cart::CartService,
    store::{Decoded, JsonStore, StoreKey},
};

/// User id recorded on bookings made without a session.
pub const GUEST_USER_ID: &str = "guest";

/// Bookings persisted under the `bookings` store key, created from a cart.
#[derive(Clone)]
pub struct StoreBookingsService {
    store: JsonStore,
    cart: Arc<dyn CartService>,
}

impl fmt::Debug for StoreBookingsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreBookingsService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl StoreBookingsService {
    /// Create a bookings service that checks out the given cart.
    #[must_use]
    pub fn new(store: JsonStore, cart: Arc<dyn CartService>) -> Self {
        Self { store, cart }
    }

    /// Booking history about to be rewritten. An unreadable store is an error here so
    /// the write that follows cannot replace history it never saw.
    fn load_for_update(&self) -> Result<Vec<Booking>, BookingsServiceError> {
        match self.store.decode(StoreKey::Bookings) {
            Decoded::Value(bookings) => Ok(bookings),
            Decoded::Missing | Decoded::Corrupt(_) => Ok(Vec::new()),
            Decoded::Unavailable(error) => Err(error.into()),
        }
    }
}

impl BookingsService for StoreBookingsService {
    fn create_booking_from_cart(&self, user_id: &str) -> Result<Vec<Booking>, BookingsServiceError> {
        let cart = self.cart.get_cart();

        if cart.is_empty() {
            debug!("checkout attempted with an empty cart");
            return Err(BookingsServiceError::EmptyCart);
        }

        let mut bookings = self.load_for_update()?;
        let mut taken: FxHashSet<String> = bookings.iter().map(|booking| booking.id.clone()).collect();
        let booked_at = Timestamp::now();

        let created = cart
            .iter()
            .map(|item| {
                let id = unique_booking_id(booked_at, &mut taken);

                Booking::from_cart_item(item, id, user_id, booked_at)
            })
            .collect::<Result<Vec<_>, _>>()?;

        bookings.extend(created.iter().cloned());

        // The purchase must be durable before the cart is emptied.
        self.store.write(StoreKey::Bookings, &bookings)?;

        info!(count = created.len(), %user_id, "bookings created from cart");

        if let Err(source) = self.cart.clear_cart() {
            error!(%source, "bookings saved but cart could not be cleared");

            return Err(BookingsServiceError::CartNotCleared {
                bookings: created,
                source,
            });
        }

        Ok(created)
    }

    fn get_bookings(&self) -> Vec<Booking> {
        self.store.read(StoreKey::Bookings)
    }

    fn get_booking(&self, id: &str) -> Option<Booking> {
        self.get_bookings()
            .into_iter()
            .find(|booking| booking.id == id)
    }

    fn get_bookings_for_event(&self, event_id: &str) -> Vec<Booking> {
        self.get_bookings()
            .into_iter()
            .filter(|booking| booking.event_id == event_id)
            .collect()
    }

    fn get_bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        self.get_bookings()
            .into_iter()
            .filter(|booking| booking.user_id == user_id)
            .collect()
    }

    fn cancel_booking(&self, id: &str) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut bookings = self.load_for_update()?;

        let cancelled = bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .is_some_and(Booking::cancel);

        if !cancelled {
            debug!(booking_id = %id, "cancel ignored; booking missing or not confirmed");
            return Ok(bookings);
        }

        self.store.write(StoreKey::Bookings, &bookings)?;

        info!(booking_id = %id, "booking cancelled");

        Ok(bookings)
    }
}

fn unique_booking_id(booked_at: Timestamp, taken: &mut FxHashSet<String>) -> String {
    loop {
        let id = generate_booking_id(booked_at);

        if taken.insert(id.clone()) {
            return id;
        }
    }
}

/// Checkout and booking history.
#[automock]
pub trait BookingsService: Send + Sync {
    /// Turn every cart line into a confirmed booking, persist them, then clear the cart.
    ///
    /// # Errors
    ///
    /// - [`BookingsServiceError::EmptyCart`]: nothing to check out; nothing is changed.
    /// - [`BookingsServiceError::Price`]: a line has no usable price; nothing is changed.
    /// - [`BookingsServiceError::Store`]: bookings could not be saved; the cart is kept.
    /// - [`BookingsServiceError::CartNotCleared`]: bookings were saved but the cart was not
    ///   emptied.
    fn create_booking_from_cart(&self, user_id: &str) -> Result<Vec<Booking>, BookingsServiceError>;

    /// Every booking, cancelled ones included, in creation order.
    fn get_bookings(&self) -> Vec<Booking>;

    /// Look up a booking by id.
    fn get_booking(&self, id: &str) -> Option<Booking>;

    /// Bookings for one event.
    fn get_bookings_for_event(&self, event_id: &str) -> Vec<Booking>;

    /// Bookings made by one user.
    fn get_bookings_for_user(&self, user_id: &str) -> Vec<Booking>;

    /// Cancel a confirmed booking. Unknown or already cancelled ids are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`BookingsServiceError::Store`] if the updated list cannot be saved.
    fn cancel_booking(&self, id: &str) -> Result<Vec<Booking>, BookingsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        bookings::BookingStatus,
        cart::{CartItem, CartServiceError, MockCartService, StoreCartService},
        store::{MemoryStore, MockKeyValueStore, StoreError},
    };

    use super::*;

    fn item(event_id: &str, price: &str, quantity: u32) -> CartItem {
        CartItem {
            event_id: event_id.to_string(),
            event_title: format!("Event {event_id}"),
            price: price.to_string(),
            quantity,
            image_url: String::new(),
        }
    }

    fn services() -> (Arc<StoreCartService>, StoreBookingsService) {
        let store = JsonStore::in_memory();
        let cart = Arc::new(StoreCartService::new(store.clone()));
        let bookings = StoreBookingsService::new(store, cart.clone());

        (cart, bookings)
    }

    #[test]
    fn checkout_creates_confirmed_booking_and_clears_cart() -> TestResult {
        let (cart, bookings) = services();

        cart.add_to_cart(item("X", "$10.00", 2))?;

        let before = Timestamp::now();
        let created = bookings.create_booking_from_cart("user-1")?;

        assert_eq!(created.len(), 1);

        let booking = created.first().ok_or("no booking created")?;

        assert_eq!(booking.total_price, Decimal::from_str("20.00")?);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.event_id, "X");
        assert_eq!(booking.user_id, "user-1");
        assert!(booking.booking_date >= before);
        assert!(booking.id.starts_with("booking-"));

        assert!(cart.get_cart().is_empty());
        assert_eq!(bookings.get_bookings(), created);

        Ok(())
    }

    #[test]
    fn checkout_appends_to_existing_history() -> TestResult {
        let (cart, bookings) = services();

        cart.add_to_cart(item("1", "$5", 1))?;
        let first = bookings.create_booking_from_cart("u")?;

        cart.add_to_cart(item("2", "$7", 1))?;
        cart.add_to_cart(item("3", "$9", 3))?;
        let second = bookings.create_booking_from_cart("u")?;

        let all = bookings.get_bookings();

        assert_eq!(all.len(), 3);
        assert_eq!(all.first(), first.first());
        assert_eq!(all.get(1..), Some(second.as_slice()));

        Ok(())
    }

    #[test]
    fn ids_are_unique_within_a_checkout() -> TestResult {
        let (cart, bookings) = services();

        for event_id in ["a", "b", "c", "d", "e"] {
            cart.add_to_cart(item(event_id, "$1", 1))?;
        }

        let created = bookings.create_booking_from_cart("u")?;
        let ids: FxHashSet<_> = created.iter().map(|booking| booking.id.as_str()).collect();

        assert_eq!(ids.len(), created.len());

        Ok(())
    }

    #[test]
    fn empty_cart_is_rejected_and_store_untouched() -> TestResult {
        let (_cart, bookings) = services();

        let result = bookings.create_booking_from_cart("u");

        assert!(
            matches!(result, Err(BookingsServiceError::EmptyCart)),
            "got {result:?}"
        );
        assert!(bookings.get_bookings().is_empty());

        Ok(())
    }

    #[test]
    fn failed_booking_write_keeps_cart() {
        let mut backend = MockKeyValueStore::new();
        backend.expect_get().returning(|_| Ok(None));
        backend
            .expect_set()
            .returning(|_, _| Err(StoreError::Unavailable));

        let mut cart = MockCartService::new();
        cart.expect_get_cart()
            .returning(|| vec![item("X", "$10.00", 2)]);
        cart.expect_clear_cart().never();

        let bookings = StoreBookingsService::new(JsonStore::new(Arc::new(backend)), Arc::new(cart));

        let result = bookings.create_booking_from_cart("u");

        assert!(
            matches!(result, Err(BookingsServiceError::Store(StoreError::Unavailable))),
            "got {result:?}"
        );
    }

    #[test]
    fn failed_cart_clear_reports_saved_bookings() -> TestResult {
        let store = JsonStore::in_memory();

        let mut cart = MockCartService::new();
        cart.expect_get_cart()
            .returning(|| vec![item("X", "$10.00", 1)]);
        cart.expect_clear_cart()
            .times(1)
            .returning(|| Err(CartServiceError::Store(StoreError::Unavailable)));

        let bookings = StoreBookingsService::new(store, Arc::new(cart));

        let result = bookings.create_booking_from_cart("u");

        let Err(BookingsServiceError::CartNotCleared { bookings: saved, .. }) = result else {
            return Err(format!("expected CartNotCleared, got {result:?}").into());
        };

        assert_eq!(saved.len(), 1);
        assert_eq!(bookings.get_bookings(), saved);

        Ok(())
    }

    #[test]
    fn invalid_price_aborts_checkout() {
        let mut cart = MockCartService::new();
        cart.expect_get_cart()
            .returning(|| vec![item("ok", "$1", 1), item("bad", "TBA", 1)]);
        cart.expect_clear_cart().never();

        let bookings = StoreBookingsService::new(JsonStore::in_memory(), Arc::new(cart));

        let result = bookings.create_booking_from_cart("u");

        assert!(
            matches!(result, Err(BookingsServiceError::Price { ref event_id, .. }) if event_id == "bad"),
            "got {result:?}"
        );
        assert!(bookings.get_bookings().is_empty());
    }

    #[test]
    fn zero_quantity_line_aborts_checkout() {
        let store = JsonStore::new(Arc::new(MemoryStore::with_entries([(
            "cart",
            r#"[{"eventId":"1","eventTitle":"Event 1","price":"$10.00","quantity":0,"imageUrl":""}]"#,
        )])));
        let cart = Arc::new(StoreCartService::new(store.clone()));
        let bookings = StoreBookingsService::new(store, cart.clone());

        let result = bookings.create_booking_from_cart("u");

        assert!(
            matches!(result, Err(BookingsServiceError::InvalidQuantity { ref event_id }) if event_id == "1"),
            "got {result:?}"
        );
        assert!(bookings.get_bookings().is_empty());
        assert_eq!(cart.get_cart().len(), 1);
    }

    #[test]
    fn unreadable_history_is_not_overwritten() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_get()
            .returning(|_| Err(StoreError::Unavailable));
        backend.expect_set().never();

        let mut cart = MockCartService::new();
        cart.expect_get_cart()
            .returning(|| vec![item("X", "$10.00", 1)]);
        cart.expect_clear_cart().never();

        let bookings = StoreBookingsService::new(JsonStore::new(Arc::new(backend)), Arc::new(cart));

        let checkout = bookings.create_booking_from_cart("u");
        assert!(
            matches!(checkout, Err(BookingsServiceError::Store(StoreError::Unavailable))),
            "got {checkout:?}"
        );

        let cancel = bookings.cancel_booking("booking-1");
        assert!(
            matches!(cancel, Err(BookingsServiceError::Store(StoreError::Unavailable))),
            "got {cancel:?}"
        );
    }

    #[test]
    fn lookups_by_id_event_and_user() -> TestResult {
        let (cart, bookings) = services();

        cart.add_to_cart(item("1", "$1", 1))?;
        cart.add_to_cart(item("2", "$2", 1))?;
        let ada = bookings.create_booking_from_cart("ada")?;

        cart.add_to_cart(item("1", "$1", 4))?;
        let grace = bookings.create_booking_from_cart("grace")?;

        let first = ada.first().ok_or("no booking")?;

        assert_eq!(bookings.get_booking(&first.id).as_ref(), Some(first));
        assert_eq!(bookings.get_booking("booking-missing"), None);
        assert_eq!(bookings.get_bookings_for_event("1").len(), 2);
        assert_eq!(bookings.get_bookings_for_event("3").len(), 0);
        assert_eq!(bookings.get_bookings_for_user("ada"), ada);
        assert_eq!(bookings.get_bookings_for_user("grace"), grace);

        Ok(())
    }

    #[test]
    fn cancel_is_idempotent() -> TestResult {
        let (cart, bookings) = services();

        cart.add_to_cart(item("1", "$1", 1))?;
        let created = bookings.create_booking_from_cart("u")?;
        let id = created.first().map(|booking| booking.id.clone()).ok_or("no booking")?;

        let once = bookings.cancel_booking(&id)?;
        let twice = bookings.cancel_booking(&id)?;

        assert_eq!(once, twice);
        assert_eq!(
            bookings.get_booking(&id).map(|booking| booking.status),
            Some(BookingStatus::Cancelled)
        );
        assert_eq!(bookings.get_bookings().len(), 1, "cancelled bookings are kept");

        Ok(())
    }

    #[test]
    fn cancel_unknown_id_is_noop() -> TestResult {
        let (cart, bookings) = services();

        cart.add_to_cart(item("1", "$1", 1))?;
        let created = bookings.create_booking_from_cart("u")?;

        let after = bookings.cancel_booking("booking-does-not-exist")?;

        assert_eq!(after, created);

        Ok(())
    }
}
