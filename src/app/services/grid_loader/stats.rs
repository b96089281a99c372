//! Load statistics and result structures for grid loading
//!
//! This module provides types for tracking how many rows were read, kept and
//! skipped, and for handing the loaded cells to the spatial index.

use crate::app::models::{Cell, GridVariant};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Skip reasons kept for reporting; later ones are only counted
pub const MAX_RECORDED_ERRORS: usize = 100;

/// Loading result with cells and statistics
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Successfully parsed cells, in file order
    pub cells: Vec<Cell>,

    /// Variant the file was read as
    pub variant: GridVariant,

    /// Description of the source (usually a path)
    pub source: String,

    pub stats: LoadStats,
}

/// Grid loading statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadStats {
    /// Number of data records encountered
    pub total_records: usize,

    /// Number of cells successfully parsed
    pub cells_loaded: usize,

    /// Number of records skipped due to errors
    pub records_skipped: usize,

    /// First skip reasons, for debugging
    pub errors: Vec<String>,

    /// Time taken to read the grid
    pub load_duration: Duration,
}

impl LoadStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_records: 0,
            cells_loaded: 0,
            records_skipped: 0,
            errors: Vec::new(),
            load_duration: Duration::ZERO,
        }
    }

    /// Count a skipped record, keeping the reason while under the cap
    pub fn record_skip(&mut self, reason: String) {
        self.records_skipped += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(reason);
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.cells_loaded as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Read {} records, loaded {} cells, skipped {} ({:.1}% loaded) in {:.2}s",
            self.total_records,
            self.cells_loaded,
            self.records_skipped,
            self.success_rate(),
            self.load_duration.as_secs_f64()
        )
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
