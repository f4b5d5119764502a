//! Toonkit - cartoon character appearance model and layered compositor
//!
//! This library provides functionality to:
//! - Describe characters as named appearance slots over shared trait catalogs
//! - Compose a character into a layered, serializable render tree
//! - Rasterize render trees to PNG images
//! - Persist rosters and apply generated items and party events

pub mod catalog;
pub mod cli;
pub mod color;
pub mod compositor;
pub mod config;
pub mod descriptor;
pub mod models;
pub mod output;
pub mod party;
pub mod raster;
pub mod shapes;
pub mod store;
