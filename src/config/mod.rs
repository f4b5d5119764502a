//! Configuration for the `toon` CLI
//!
//! Provides types and parsing for `toon.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
