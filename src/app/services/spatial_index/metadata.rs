//! Grid metadata for reporting
//!
//! Snapshot of what was loaded, used by the `grid` command and the `/ping`
//! endpoint.

use crate::app::models::{Bounds, GridVariant};
use crate::app::services::grid_loader::LoadStats;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a loaded grid
#[derive(Debug, Clone, Serialize)]
pub struct GridMetadata {
    /// Grid source, usually the file path
    pub source: String,

    pub variant: GridVariant,

    pub cell_count: usize,

    /// Union of all cell bounds
    pub extent: Option<Bounds>,

    pub loaded_at: DateTime<Utc>,

    pub load_stats: LoadStats,
}

impl GridMetadata {
    /// Covered area in square kilometres, ignoring gaps between cells
    pub fn extent_area_km2(&self) -> f64 {
        self.extent
            .map(|b| (b.x_max - b.x_min) * (b.y_max - b.y_min) / 1_000_000.0)
            .unwrap_or(0.0)
    }

    /// Get a summary string of the loaded grid
    pub fn summary(&self) -> String {
        format!(
            "{} grid with {} cells from {} (loaded {})",
            self.variant,
            self.cell_count,
            self.source,
            self.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}
