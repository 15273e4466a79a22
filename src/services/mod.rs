//! Service layer for business logic
//!
//! Storage lives here so the HTTP handlers stay thin and testable.

pub mod pages;

pub use pages::{Page, PageStore};
