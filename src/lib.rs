//! Wiki page editor and item catalog services
//!
//! Two small axum services sharing one crate: a flat-file wiki rendered
//! through HTML templates, and an in-memory item catalog with a JSON API.
//! The binaries live in `src/bin/`.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod services;
/// In-memory catalog state
pub mod state;
