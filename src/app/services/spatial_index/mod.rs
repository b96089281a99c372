//! Spatial index over the loaded grid
//!
//! The index owns the cells in file order and answers point-in-cell queries by
//! linear scan. It is built once at startup and never mutated afterwards, so it
//! can be shared behind an `Arc` and read from any number of tasks.

use crate::app::models::{Bounds, Cell, GridVariant};
use crate::app::services::grid_loader::{LoadResult, LoadStats};
use chrono::{DateTime, Utc};

pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::GridMetadata;

/// Read-only collection of grid cells with point lookup
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    /// Cells in load order; lookup returns the first match
    pub(crate) cells: Vec<Cell>,

    /// Variant the grid was read as
    pub(crate) variant: GridVariant,

    /// Description of the grid source
    pub(crate) source: String,

    /// Union of all cell bounds, computed once
    pub(crate) extent: Option<Bounds>,

    /// Statistics from the load that produced these cells
    pub(crate) load_stats: LoadStats,

    /// When the grid was loaded
    pub(crate) loaded_at: DateTime<Utc>,
}

impl SpatialIndex {
    /// Build an index from cells in the order they should be searched
    pub fn new(cells: Vec<Cell>, variant: GridVariant) -> Self {
        let extent = compute_extent(&cells);
        Self {
            cells,
            variant,
            source: String::new(),
            extent,
            load_stats: LoadStats::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Build an index from a grid load, keeping its statistics
    pub fn from_load_result(result: LoadResult) -> Self {
        let extent = compute_extent(&result.cells);
        Self {
            cells: result.cells,
            variant: result.variant,
            source: result.source,
            extent,
            load_stats: result.stats,
            loaded_at: Utc::now(),
        }
    }

    /// Get the total number of cells in the index
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn variant(&self) -> GridVariant {
        self.variant
    }

    /// Union of all cell bounds, `None` for an empty index
    pub fn extent(&self) -> Option<Bounds> {
        self.extent
    }

    /// Get index metadata
    pub fn metadata(&self) -> GridMetadata {
        GridMetadata {
            source: self.source.clone(),
            variant: self.variant,
            cell_count: self.cells.len(),
            extent: self.extent,
            loaded_at: self.loaded_at,
            load_stats: self.load_stats.clone(),
        }
    }
}

fn compute_extent(cells: &[Cell]) -> Option<Bounds> {
    cells
        .iter()
        .map(|cell| cell.bounds)
        .reduce(|acc, bounds| acc.union(&bounds))
}
