//! Catalog state
//!
//! Owns the ordered item sequence shared by the catalog handlers.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Catalog item as exchanged over the wire
///
/// Missing or `null` fields decode to their empty value; only a value of the
/// wrong JSON type is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Item {
    /// Caller-chosen identifier, not required to be unique
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Item category (e.g. "Ship")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub item_type: String,
    /// Unit price
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// Create an item from its fields
    pub fn new(id: &str, name: &str, item_type: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            item_type: item_type.to_string(),
            price,
        }
    }
}

/// Items present at process start, in order
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new("1", "Hoarder", "Ship", 56.99),
        Item::new("2", "Mammoth", "Ship", 17.99),
        Item::new("3", "Iterion Mark V", "Ship", 39.99),
    ]
}

/// Catalog handle passed to handlers as axum state
pub type SharedCatalog = Arc<RwLock<Catalog>>;

/// In-memory item catalog
///
/// Insertion order is preserved. Nothing is ever updated or removed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the seed items
    pub fn seeded() -> Self {
        Self {
            items: seed_items(),
        }
    }

    /// Wrap the catalog for sharing between handlers
    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(RwLock::new(self))
    }

    /// All items in insertion order
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    /// First item whose id equals `id`
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Append an item; duplicates by id are kept
    pub fn append(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
