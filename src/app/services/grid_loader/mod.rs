//! Grid loader for accessibility score files
//!
//! This module turns a delimited, comma-decimal grid file into an ordered list of
//! [`Cell`](crate::app::models::Cell) records. Both observed file layouts are handled
//! by the same loader, configured by a [`GridSchema`] chosen from the header.
//!
//! ## Architecture
//!
//! - [`loader`] - Reading orchestration, fatal checks and row loop
//! - [`schema`] - Variant descriptors: required columns, optional columns, headline rule
//! - [`column_mapping`] - Header analysis and variant detection
//! - [`record_parser`] - Conversion of one record into a cell
//! - [`field_parsers`] - Locale-aware numeric parsing helpers
//! - [`stats`] - Load statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use accesstc::app::services::grid_loader::GridLoader;
//!
//! # fn example() -> accesstc::Result<()> {
//! let result = GridLoader::new().load_file(std::path::Path::new("grid_scores.csv"))?;
//!
//! println!("Loaded {} cells ({} variant), skipped {} rows",
//!          result.cells.len(),
//!          result.variant,
//!          result.stats.records_skipped);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod loader;
pub mod record_parser;
pub mod schema;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use loader::GridLoader;
pub use schema::{GridSchema, HeadlineRule};
pub use stats::{LoadResult, LoadStats};
