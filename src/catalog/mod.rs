//! Event Catalog
//!
//! Read-only event listings, loaded from YAML. The catalog is only consulted when an
//! event is added to the cart and when stored records are displayed; cart items and
//! bookings keep their own snapshot of the event.

use std::{fs, path::Path};

use mockall::automock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cart::CartItem;

const BUILTIN_EVENTS: &str = include_str!("events.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two events share an id
    #[error("duplicate event id in catalog: {0}")]
    DuplicateEvent(String),
}

/// A listed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Catalog id.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Display date, e.g. `"Jun 10-12, 2025"`.
    pub date: String,

    /// Venue city.
    pub location: String,

    /// Cover image.
    pub image_url: String,

    /// Listing category.
    pub category: String,

    /// Display price, e.g. `"$149.99"`.
    pub price: String,

    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Door times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Venue capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tickets: Option<u32>,

    /// Tickets still on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_tickets: Option<u32>,
}

impl Event {
    /// Snapshot of this event as a cart line.
    #[must_use]
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            event_id: self.id.clone(),
            event_title: self.title.clone(),
            price: self.price.clone(),
            quantity,
            image_url: self.image_url.clone(),
        }
    }
}

/// Event lookup.
#[automock]
pub trait Catalog: Send + Sync {
    /// Find an event by id.
    fn find_event(&self, id: &str) -> Option<Event>;

    /// Every listed event in catalog order.
    fn events(&self) -> Vec<Event>;
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    events: Vec<Event>,
}

/// Catalog backed by a YAML fixture.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    events: Vec<Event>,
    index: FxHashMap<String, usize>,
}

impl FixtureCatalog {
    /// The built-in demo events.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture does not parse.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_EVENTS)
    }

    /// Load events from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or repeats an event id.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path.as_ref())?;

        let catalog = Self::from_yaml(&contents)?;

        debug!(path = %path.as_ref().display(), events = catalog.events.len(), "catalog loaded");

        Ok(catalog)
    }

    /// Parse events from YAML text with a top-level `events` list.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or repeats an event id.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Self::from_events(fixture.events)
    }

    /// Build a catalog from a list of events.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateEvent`] if two events share an id.
    pub fn from_events(events: Vec<Event>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (position, event) in events.iter().enumerate() {
            if index.insert(event.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateEvent(event.id.clone()));
            }
        }

        Ok(Self { events, index })
    }
}

impl Catalog for FixtureCatalog {
    fn find_event(&self, id: &str) -> Option<Event> {
        self.index
            .get(id)
            .and_then(|position| self.events.get(*position))
            .cloned()
    }

    fn events(&self) -> Vec<Event> {
        self.events.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn builtin_catalog_lists_demo_events() -> TestResult {
        let catalog = FixtureCatalog::builtin()?;
        let events = catalog.events();

        let ids: Vec<_> = events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
        assert!(events.iter().all(|event| event.price == "$149.99"));

        Ok(())
    }

    #[test]
    fn find_event_by_id() -> TestResult {
        let catalog = FixtureCatalog::builtin()?;

        let event = catalog.find_event("4").ok_or("event 4 missing")?;

        assert_eq!(event.title, "Food & Wine Expo");
        assert_eq!(event.location, "Chicago, IL");
        assert_eq!(event.available_tickets, Some(237));
        assert!(catalog.find_event("99").is_none());

        Ok(())
    }

    #[test]
    fn optional_fields_default_to_none() -> TestResult {
        let catalog = FixtureCatalog::from_yaml(
            r#"
events:
  - id: a
    title: Meetup
    date: Jan 1, 2026
    location: Leeds, UK
    imageUrl: https://example.com/a.jpg
    category: Community
    price: "£5.00"
"#,
        )?;

        let event = catalog.find_event("a").ok_or("event a missing")?;

        assert_eq!(event.description, None);
        assert_eq!(event.total_tickets, None);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() -> TestResult {
        let event = FixtureCatalog::builtin()?
            .find_event("1")
            .ok_or("event 1 missing")?;

        let result = FixtureCatalog::from_events(vec![event.clone(), event]);

        assert!(
            matches!(result, Err(CatalogError::DuplicateEvent(ref id)) if id == "1"),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn loads_catalog_from_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        file.write_all(BUILTIN_EVENTS.as_bytes())?;

        let catalog = FixtureCatalog::from_path(file.path())?;

        assert_eq!(catalog.events().len(), 6);

        Ok(())
    }

    #[test]
    fn event_snapshot_as_cart_item() -> TestResult {
        let event = FixtureCatalog::builtin()?
            .find_event("2")
            .ok_or("event 2 missing")?;

        let item = event.to_cart_item(3);

        assert_eq!(item.event_id, "2");
        assert_eq!(item.event_title, "Summer Music Festival");
        assert_eq!(item.price, "$149.99");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.image_url, event.image_url);

        Ok(())
    }
}
