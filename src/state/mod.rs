//! State management module
//!
//! Handles the in-memory catalog shared by the catalog handlers.

/// Item catalog and seed data
pub mod catalog;

pub use catalog::{Catalog, Item, SharedCatalog};
