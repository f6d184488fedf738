//! Configuration module for mintile
//!
//! Provides types, discovery and parsing for `mintile.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
