//! Configuration module for pxfill
//!
//! Provides types, discovery and loading for `pxfill.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
