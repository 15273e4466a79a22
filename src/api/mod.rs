//! API module
//!
//! HTTP request handlers for the wiki and catalog services

pub mod catalog;
pub mod wiki;
