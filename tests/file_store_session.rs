//! Session, cart and bookings persisted through a directory-backed store.

use std::{fs, sync::Arc};

use eventiverse::{notifier::MockNotifier, prelude::*};
use testresult::TestResult;

fn open(dir: &std::path::Path) -> Result<AppContext, AppError> {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().returning(|_, _| ());

    Ok(AppContext::new(AppParts {
        store: JsonStore::new(Arc::new(FileStore::open(dir)?)),
        catalog: Arc::new(FixtureCatalog::builtin()?),
        identity: Arc::new(DemoIdentityProvider),
        notifier: Arc::new(notifier),
        pricing: Pricing::default(),
    }))
}

#[test]
fn session_and_bookings_survive_restart() -> TestResult {
    let dir = tempfile::tempdir()?;

    let user = {
        let mut app = open(dir.path())?;

        let user = app.sign_up(&Registration::new("Ada", "ada@example.com", "pw"))?;
        app.add_event_to_cart("3", 2)?;
        app.checkout()?;
        app.add_event_to_cart("4", 1)?;

        user
    };

    let app = open(dir.path())?;

    assert!(app.session().is_authenticated());
    assert_eq!(app.session().user(), Some(&user));

    let bookings = app.my_bookings();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings.first().map(|booking| booking.quantity), Some(2));

    let cart = app.cart_items();
    assert_eq!(cart.first().map(|item| item.event_id.as_str()), Some("4"));

    Ok(())
}

#[test]
fn sign_out_removes_session_files() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut app = open(dir.path())?;
        app.sign_in(&Credentials::new("demo@example.com", "pw"))?;
    }

    assert!(dir.path().join("user.json").exists());
    assert!(dir.path().join("authToken.json").exists());

    {
        let mut app = open(dir.path())?;
        app.sign_out();
    }

    assert!(!dir.path().join("user.json").exists());
    assert!(!dir.path().join("authToken.json").exists());
    assert!(!open(dir.path())?.session().is_authenticated());

    Ok(())
}

#[test]
fn corrupt_cart_file_reads_as_empty() -> TestResult {
    let dir = tempfile::tempdir()?;

    fs::write(dir.path().join("cart.json"), "[{\"eventId\": ")?;

    let app = open(dir.path())?;

    assert!(app.cart_items().is_empty());

    app.add_event_to_cart("1", 1)?;

    assert_eq!(app.cart_items().len(), 1);

    Ok(())
}
