//! Accessibility resolution for projected points
//!
//! The resolver ties the spatial index to the classifiers: it finds the cell
//! containing a Lambert 2008 point and shapes the cell into a report with the
//! headline classification and, for the extended grid, a per-mode breakdown.

use crate::app::models::{Bounds, Cell, Center, GridVariant, HeadlineScore};
use crate::app::services::score_classifier::{class10_comment, classify};
use crate::app::services::spatial_index::SpatialIndex;
use crate::constants::columns;
use crate::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Resolved cell with its classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityReport {
    pub variant: GridVariant,

    #[serde(rename = "case")]
    pub cell: CellReport,

    /// Per-mode breakdown, extended grid only
    pub accessibility_analysis: Option<AccessibilityAnalysis>,
}

/// Cell identity, geometry and headline score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellReport {
    pub id: i64,
    #[serde(rename = "score10")]
    pub score: Option<HeadlineScore>,
    /// Headline label from the classifier of the grid variant
    pub classe: Option<&'static str>,
    /// Class-10 comment of the headline, extended grid only
    pub comment: Option<&'static str>,
    pub center_lambert2008: Center,
    pub bounds_lambert2008: Bounds,
    pub size_meters: f64,
}

/// Scores of the three transport modes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityAnalysis {
    pub total: ModeMetric,
    pub train: ModeMetric,
    pub mtb: ModeMetric,
}

/// Percentile and class of one transport mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeMetric {
    pub percentile: Option<f64>,
    pub score10: Option<i64>,
    pub score10_comment: Option<&'static str>,
}

impl ModeMetric {
    fn from_cell(cell: &Cell, percentile_column: &str, class_column: &str) -> Self {
        let score10 = cell
            .extra(class_column)
            .and_then(|value| value.as_class());

        Self {
            percentile: cell
                .extra(percentile_column)
                .and_then(|value| value.as_percentile()),
            score10,
            score10_comment: class10_comment(score10),
        }
    }
}

impl AccessibilityAnalysis {
    pub fn from_cell(cell: &Cell) -> Self {
        Self {
            total: ModeMetric::from_cell(cell, columns::TOTAL_PERCENTILE, columns::TOTAL_CLASS10),
            train: ModeMetric::from_cell(cell, columns::TRAIN_PERCENTILE, columns::TRAIN_CLASS10),
            mtb: ModeMetric::from_cell(cell, columns::MTB_PERCENTILE, columns::MTB_CLASS10),
        }
    }
}

/// Resolves projected points against a shared grid
#[derive(Debug, Clone)]
pub struct AccessibilityResolver {
    index: Arc<SpatialIndex>,
}

impl AccessibilityResolver {
    pub fn new(index: Arc<SpatialIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Resolve a Lambert 2008 point to its cell report
    ///
    /// Returns [`Error::NotCovered`] when the point lies outside every cell.
    pub fn resolve(&self, x: f64, y: f64) -> Result<AccessibilityReport> {
        let cell = self.index.find(x, y).ok_or_else(|| {
            debug!("No cell contains ({}, {})", x, y);
            Error::not_covered(x, y)
        })?;

        debug!("Point ({}, {}) resolved to cell {}", x, y, cell.id);
        Ok(self.build_report(cell))
    }

    /// Shape a cell into a report for the index's grid variant
    pub fn build_report(&self, cell: &Cell) -> AccessibilityReport {
        let variant = self.index.variant();

        let accessibility_analysis = match variant {
            GridVariant::Extended => Some(AccessibilityAnalysis::from_cell(cell)),
            GridVariant::Simple => None,
        };

        AccessibilityReport {
            variant,
            cell: CellReport {
                id: cell.id,
                score: cell.score,
                classe: cell.score.as_ref().and_then(classify),
                comment: class10_comment(cell.score.and_then(|score| score.class10())),
                center_lambert2008: cell.center(),
                bounds_lambert2008: cell.bounds,
                size_meters: cell.size,
            },
            accessibility_analysis,
        }
    }
}
