//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{
    bookings::{
        Booking, BookingStatus, BookingsService, BookingsServiceError, GUEST_USER_ID,
        StoreBookingsService,
    },
    cart::{
        CartChange, CartItem, CartService, CartServiceError, CartTotals, CartUpdate,
        StoreCartService, compute_totals, item_count,
    },
    catalog::{Catalog, CatalogError, FixtureCatalog},
    config::{AppConfig, ConfigError},
    notifier::{NoticeKind, Notifier},
    prices::{PriceError, Pricing},
    session::{
        Credentials, DemoIdentityProvider, IdentityProvider, ProfileUpdate, Registration,
        SessionError, SessionManager, User,
    },
    store::{FileStore, JsonStore, StoreError},
};

/// Errors surfaced by application flows.
#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog has no event with this id.
    #[error("event {0} not found")]
    UnknownEvent(String),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartServiceError),

    /// Booking operation failed.
    #[error(transparent)]
    Bookings(#[from] BookingsServiceError),

    /// Session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Cart totals could not be computed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Settings are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store could not be opened.
    #[error("failed to open store")]
    Store(#[from] StoreError),
}

/// Collaborators an [`AppContext`] is assembled from.
pub struct AppParts {
    /// Persistent store shared by every service.
    pub store: JsonStore,

    /// Event lookup.
    pub catalog: Arc<dyn Catalog>,

    /// Account resolution for sign in and sign up.
    pub identity: Arc<dyn IdentityProvider>,

    /// Notification sink.
    pub notifier: Arc<dyn Notifier>,

    /// Currency and tax settings.
    pub pricing: Pricing,
}

impl std::fmt::Debug for AppParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppParts")
            .field("store", &self.store)
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}

/// Services and session for one client, plus the user-facing flows that tie them
/// together and report their outcome to the [`Notifier`].
pub struct AppContext {
    /// Cart operations.
    pub cart: Arc<dyn CartService>,

    /// Checkout and booking history.
    pub bookings: Arc<dyn BookingsService>,

    /// Event lookup.
    pub catalog: Arc<dyn Catalog>,

    /// Currency and tax settings.
    pub pricing: Pricing,

    session: SessionManager,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Assemble a context and restore any stored session.
    pub fn new(parts: AppParts) -> Self {
        let AppParts {
            store,
            catalog,
            identity,
            notifier,
            pricing,
        } = parts;

        let cart: Arc<dyn CartService> = Arc::new(StoreCartService::new(store.clone()));
        let bookings = Arc::new(StoreBookingsService::new(store.clone(), Arc::clone(&cart)));

        Self {
            cart,
            bookings,
            catalog,
            pricing,
            session: SessionManager::restore(store, identity),
            notifier,
        }
    }

    /// Build a context from settings: a file store in the data directory and the
    /// configured or built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, the data directory cannot be
    /// created or the catalog cannot be loaded.
    pub fn from_config(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<Self, AppError> {
        let pricing = config.pricing.pricing()?;
        let store = FileStore::open(config.storage.data_dir.clone())?;

        let catalog = match &config.catalog.catalog_path {
            Some(path) => FixtureCatalog::from_path(path)?,
            None => FixtureCatalog::builtin()?,
        };

        Ok(Self::new(AppParts {
            store: JsonStore::new(Arc::new(store)),
            catalog: Arc::new(catalog),
            identity: Arc::new(DemoIdentityProvider),
            notifier,
            pricing,
        }))
    }

    /// A context over a fresh in-memory store with the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog cannot be parsed.
    pub fn in_memory(notifier: Arc<dyn Notifier>) -> Result<Self, AppError> {
        Ok(Self::new(AppParts {
            store: JsonStore::in_memory(),
            catalog: Arc::new(FixtureCatalog::builtin()?),
            identity: Arc::new(DemoIdentityProvider),
            notifier,
            pricing: Pricing::default(),
        }))
    }

    /// The current session.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Current cart.
    pub fn cart_items(&self) -> Vec<CartItem> {
        self.cart.get_cart()
    }

    /// Total tickets in the cart.
    pub fn cart_item_count(&self) -> u64 {
        item_count(&self.cart.get_cart())
    }

    /// Subtotal, taxes and total of the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored price cannot be parsed.
    pub fn cart_totals(&self) -> Result<CartTotals, AppError> {
        Ok(compute_totals(&self.cart.get_cart(), &self.pricing)?)
    }

    /// Add tickets for a catalog event to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownEvent`] if the catalog has no such event, or the cart
    /// error if the item is rejected or cannot be saved.
    pub fn add_event_to_cart(&self, event_id: &str, quantity: u32) -> Result<CartUpdate, AppError> {
        let Some(event) = self.catalog.find_event(event_id) else {
            return self.failed(AppError::UnknownEvent(event_id.to_string()));
        };

        let update = self.reported(self.cart.add_to_cart(event.to_cart_item(quantity)))?;

        let message = match update.change {
            CartChange::Added => format!("Added \"{}\" to cart", event.title),
            CartChange::QuantityUpdated => {
                format!("Updated quantity for \"{}\" in cart", event.title)
            }
        };

        self.notifier.notify(NoticeKind::Success, &message);

        Ok(update)
    }

    /// Set the quantity of a cart line; below one removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn update_quantity(&self, event_id: &str, quantity: u32) -> Result<Vec<CartItem>, AppError> {
        self.reported(self.cart.update_quantity(event_id, quantity))
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn remove_from_cart(&self, event_id: &str) -> Result<Vec<CartItem>, AppError> {
        let cart = self.reported(self.cart.remove_from_cart(event_id))?;

        self.notifier.notify(NoticeKind::Info, "Removed item from cart");

        Ok(cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be removed.
    pub fn clear_cart(&self) -> Result<Vec<CartItem>, AppError> {
        self.reported(self.cart.clear_cart())
    }

    /// Book everything in the cart for the signed-in user, or as a guest.
    ///
    /// # Errors
    ///
    /// Returns the checkout error; see [`BookingsService::create_booking_from_cart`].
    pub fn checkout(&self) -> Result<Vec<Booking>, AppError> {
        let user_id = self.session.user_id().unwrap_or(GUEST_USER_ID);

        match self.bookings.create_booking_from_cart(user_id) {
            Ok(created) => {
                self.notifier.notify(
                    NoticeKind::Success,
                    "Booking confirmed! Thank you for your purchase.",
                );

                Ok(created)
            }
            Err(BookingsServiceError::EmptyCart) => {
                self.notifier.notify(NoticeKind::Error, "Your cart is empty");

                Err(BookingsServiceError::EmptyCart.into())
            }
            Err(error) => self.failed(error.into()),
        }
    }

    /// Bookings made by the signed-in user, or guest bookings when signed out.
    pub fn my_bookings(&self) -> Vec<Booking> {
        let user_id = self.session.user_id().unwrap_or(GUEST_USER_ID);

        self.bookings.get_bookings_for_user(user_id)
    }

    /// Cancel a confirmed booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated bookings cannot be saved.
    pub fn cancel_booking(&self, id: &str) -> Result<Vec<Booking>, AppError> {
        let was_confirmed = self
            .bookings
            .get_booking(id)
            .is_some_and(|booking| booking.status == BookingStatus::Confirmed);

        let bookings = self.reported(self.bookings.cancel_booking(id))?;

        if was_confirmed {
            self.notifier.notify(NoticeKind::Info, "Booking cancelled");
        } else {
            debug!(booking_id = %id, "nothing to cancel");
        }

        Ok(bookings)
    }

    /// Sign in and greet the returning user.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity provider rejects the credentials.
    pub fn sign_in(&mut self, credentials: &Credentials) -> Result<User, AppError> {
        let result = self.session.sign_in(credentials).cloned();
        let user = self.reported(result)?;

        self.notifier
            .notify(NoticeKind::Success, &format!("Welcome back, {}!", user.name));

        Ok(user)
    }

    /// Register and welcome the new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity provider rejects the registration.
    pub fn sign_up(&mut self, registration: &Registration) -> Result<User, AppError> {
        let result = self.session.sign_up(registration).cloned();
        let user = self.reported(result)?;

        self.notifier.notify(
            NoticeKind::Success,
            &format!("Welcome to Eventiverse, {}!", user.name),
        );

        Ok(user)
    }

    /// End the session.
    pub fn sign_out(&mut self) {
        self.session.sign_out();

        self.notifier
            .notify(NoticeKind::Success, "You have been signed out successfully");
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when signed out.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<User, AppError> {
        let result = self.session.update_profile(update).cloned();
        let user = self.reported(result)?;

        self.notifier.notify(
            NoticeKind::Success,
            "Your profile has been updated successfully",
        );

        Ok(user)
    }

    fn reported<T, E: Into<AppError>>(&self, result: Result<T, E>) -> Result<T, AppError> {
        result.or_else(|error| self.failed(error.into()))
    }

    fn failed<T>(&self, error: AppError) -> Result<T, AppError> {
        self.notifier.notify(NoticeKind::Error, &error.to_string());

        Err(error)
    }
}
