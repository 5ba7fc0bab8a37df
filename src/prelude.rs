//! Eventiverse prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bookings::{
        Booking, BookingStatus, BookingsService, BookingsServiceError, GUEST_USER_ID,
        StoreBookingsService,
    },
    cart::{
        CartChange, CartItem, CartService, CartServiceError, CartTotals, CartUpdate,
        StoreCartService, compute_totals, item_count,
    },
    catalog::{Catalog, CatalogError, Event, FixtureCatalog},
    context::{AppContext, AppError, AppParts},
    notifier::{NoticeKind, Notifier, TracingNotifier},
    prices::{PriceError, Pricing, line_total, parse_price},
    session::{
        Credentials, DemoIdentityProvider, IdentityProvider, ProfileUpdate, Registration,
        SessionError, SessionManager, SessionToken, User,
    },
    store::{Decoded, FileStore, JsonStore, KeyValueStore, MemoryStore, StoreError, StoreKey},
};
