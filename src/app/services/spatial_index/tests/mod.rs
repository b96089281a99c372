//! Shared test utilities and fixtures for spatial index tests

use crate::app::models::{Cell, GridVariant, HeadlineScore};
use crate::app::services::spatial_index::SpatialIndex;
use std::collections::BTreeMap;

pub mod query_tests;

/// Create a test cell with a raw score
pub fn create_test_cell(id: i64, center_x: f64, center_y: f64, size: f64) -> Cell {
    Cell::new(
        id,
        center_x,
        center_y,
        size,
        Some(HeadlineScore::Raw(id as f64)),
        BTreeMap::new(),
    )
    .unwrap()
}

/// Row of three adjacent 2x2 cells centered at x = 0, 2, 4
pub fn create_test_index() -> SpatialIndex {
    SpatialIndex::new(
        vec![
            create_test_cell(1, 0.0, 0.0, 2.0),
            create_test_cell(2, 2.0, 0.0, 2.0),
            create_test_cell(3, 4.0, 0.0, 2.0),
        ],
        GridVariant::Simple,
    )
}
