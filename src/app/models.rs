//! Data models for the accessibility grid
//!
//! This module contains the core data structures for grid cells, their scores
//! and the two grid format variants.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Grid Variants
// =============================================================================

/// Grid file format variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridVariant {
    /// Single mandatory `score` column with a raw score
    Simple,
    /// No `score` column; headline is the total class-10 column, with per-mode metrics
    Extended,
}

impl fmt::Display for GridVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridVariant::Simple => write!(f, "simple"),
            GridVariant::Extended => write!(f, "extended"),
        }
    }
}

/// How the loader picks the grid variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantSelection {
    /// Inspect the header: `score` present means simple
    #[default]
    Auto,
    Simple,
    Extended,
}

impl FromStr for VariantSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(VariantSelection::Auto),
            "simple" => Ok(VariantSelection::Simple),
            "extended" => Ok(VariantSelection::Extended),
            other => Err(Error::configuration(format!(
                "Unknown grid variant '{}': expected auto, simple or extended",
                other
            ))),
        }
    }
}

// =============================================================================
// Scores
// =============================================================================

/// Headline score of a cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeadlineScore {
    /// Raw score (simple variant)
    Raw(f64),
    /// Class 1-10 (extended variant)
    Class10(i64),
}

impl HeadlineScore {
    /// Class value, if this is a class-10 score
    pub fn class10(&self) -> Option<i64> {
        match self {
            HeadlineScore::Class10(class) => Some(*class),
            HeadlineScore::Raw(_) => None,
        }
    }

    /// Score as a float regardless of variant
    pub fn as_f64(&self) -> f64 {
        match self {
            HeadlineScore::Raw(value) => *value,
            HeadlineScore::Class10(class) => *class as f64,
        }
    }
}

impl fmt::Display for HeadlineScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadlineScore::Raw(value) => write!(f, "{}", value),
            HeadlineScore::Class10(class) => write!(f, "{}/10", class),
        }
    }
}

/// Value of an optional metric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Percentile score rounded to 2 decimals
    Percentile(f64),
    /// Integer class from a `_Classe_10` column
    Class(i64),
}

impl MetricValue {
    pub fn as_percentile(&self) -> Option<f64> {
        match self {
            MetricValue::Percentile(value) => Some(*value),
            MetricValue::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<i64> {
        match self {
            MetricValue::Class(class) => Some(*class),
            MetricValue::Percentile(_) => None,
        }
    }
}

// =============================================================================
// Cell Geometry
// =============================================================================

/// Axis-aligned bounds in Lambert 2008 metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Half-open containment: lower bounds inclusive, upper bounds exclusive
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x < self.x_max && self.y_min <= y && y < self.y_max
    }

    /// True if the two rectangles share interior area
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }

    /// Smallest bounds covering both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// Cell center in Lambert 2008 metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub x_center: f64,
    pub y_center: f64,
}

// =============================================================================
// Cell
// =============================================================================

/// One square cell of the accessibility grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Identifier from the `id` column
    pub id: i64,

    pub center_x: f64,
    pub center_y: f64,

    /// Side length in metres
    pub size: f64,

    /// Derived from center and size at construction
    pub bounds: Bounds,

    /// Headline score, absent when the source value is missing or unparseable
    pub score: Option<HeadlineScore>,

    /// Optional metric columns (extended variant only)
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub extras: BTreeMap<String, Option<MetricValue>>,
}

impl Cell {
    /// Create a new Cell with validation
    pub fn new(
        id: i64,
        center_x: f64,
        center_y: f64,
        size: f64,
        score: Option<HeadlineScore>,
        extras: BTreeMap<String, Option<MetricValue>>,
    ) -> Result<Self> {
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(Error::data_validation(format!(
                "Cell {} has a non-finite center ({}, {})",
                id, center_x, center_y
            )));
        }

        if !size.is_finite() || size <= 0.0 {
            return Err(Error::data_validation(format!(
                "Cell {} has invalid size {}: must be a positive number",
                id, size
            )));
        }

        let half = size / 2.0;
        let bounds = Bounds {
            x_min: center_x - half,
            x_max: center_x + half,
            y_min: center_y - half,
            y_max: center_y + half,
        };

        // Huge centers can swallow a tiny size in floating point
        if !(bounds.x_min < bounds.x_max && bounds.y_min < bounds.y_max) {
            return Err(Error::data_validation(format!(
                "Cell {} has degenerate bounds for size {}",
                id, size
            )));
        }

        Ok(Self {
            id,
            center_x,
            center_y,
            size,
            bounds,
            score,
            extras,
        })
    }

    /// Check whether the point falls inside this cell
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }

    pub fn center(&self) -> Center {
        Center {
            x_center: self.center_x,
            y_center: self.center_y,
        }
    }

    /// Look up an optional metric; `None` when the column is missing or blank
    pub fn extra(&self, column: &str) -> Option<MetricValue> {
        self.extras.get(column).copied().flatten()
    }
}
