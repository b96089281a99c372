//! Tests for cell lookup and search functionality

use super::*;
use crate::app::models::{Bounds, GridVariant};
use crate::app::services::grid_loader::GridLoader;
use crate::app::services::spatial_index::SpatialIndex;

#[test]
fn test_find_point_inside_cell() {
    let index = create_test_index();

    assert_eq!(index.find(0.5, 0.5).map(|c| c.id), Some(1));
    assert_eq!(index.find(2.0, 0.0).map(|c| c.id), Some(2));
    assert_eq!(index.find(4.9, -0.9).map(|c| c.id), Some(3));
}

#[test]
fn test_shared_edge_belongs_to_next_cell() {
    let index = create_test_index();

    // Cell 1 spans [-1, 1); x = 1 is the lower edge of cell 2
    assert_eq!(index.find(-1.0, 0.0).map(|c| c.id), Some(1));
    assert_eq!(index.find(1.0, 0.0).map(|c| c.id), Some(2));
    assert_eq!(index.find(3.0, 0.0).map(|c| c.id), Some(3));
}

#[test]
fn test_upper_edges_are_excluded() {
    let index = create_test_index();

    assert!(index.find(5.0, 0.0).is_none());
    assert!(index.find(0.0, 1.0).is_none());
    assert_eq!(index.find(0.0, -1.0).map(|c| c.id), Some(1));
}

#[test]
fn test_far_point_is_not_found() {
    let index = create_test_index();

    assert!(index.find(1e9, 1e9).is_none());
    assert!(index.find(-1e9, 0.0).is_none());
}

#[test]
fn test_first_match_wins_for_overlapping_cells() {
    let index = SpatialIndex::new(
        vec![
            create_test_cell(10, 0.0, 0.0, 4.0),
            create_test_cell(20, 0.0, 0.0, 2.0),
        ],
        GridVariant::Simple,
    );

    assert_eq!(index.find(0.0, 0.0).map(|c| c.id), Some(10));
}

#[test]
fn test_get_cell_by_id() {
    let index = create_test_index();

    assert_eq!(index.get_cell(2).map(|c| c.center_x), Some(2.0));
    assert!(index.get_cell(99).is_none());
    assert!(index.contains_cell(3));
}

#[test]
fn test_cells_in_region() {
    let index = create_test_index();

    let all = index.cells_in_region(-10.0, 10.0, -10.0, 10.0);
    assert_eq!(all.len(), 3);

    let middle = index.cells_in_region(1.5, 2.5, -0.5, 0.5);
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].id, 2);

    // Touching the edge only does not count
    let touching = index.cells_in_region(5.0, 6.0, -1.0, 1.0);
    assert!(touching.is_empty());
}

#[test]
fn test_extent_covers_all_cells() {
    let index = create_test_index();

    assert_eq!(
        index.extent(),
        Some(Bounds {
            x_min: -1.0,
            x_max: 5.0,
            y_min: -1.0,
            y_max: 1.0,
        })
    );
    assert_eq!(SpatialIndex::new(Vec::new(), GridVariant::Simple).extent(), None);
}

#[test]
fn test_skipped_rows_never_match() {
    let content = "id;X_LB2008;Y_LB2008;ms_len;score\n\
                   1;0;0;2;7\n\
                   2;10;10;abc;7\n";
    let result = GridLoader::new()
        .load_reader(content.as_bytes(), "test")
        .unwrap();
    let index = SpatialIndex::from_load_result(result);

    assert_eq!(index.cell_count(), 1);
    assert!(index.find(10.0, 10.0).is_none());
    assert!(!index.contains_cell(2));
}

#[test]
fn test_metadata_from_load_result() {
    let content = "id;X_LB2008;Y_LB2008;ms_len\n1;0;0;1000\n2;1000;0;1000\n";
    let result = GridLoader::new()
        .load_reader(content.as_bytes(), "grid.csv")
        .unwrap();
    let index = SpatialIndex::from_load_result(result);
    let metadata = index.metadata();

    assert_eq!(metadata.source, "grid.csv");
    assert_eq!(metadata.variant, GridVariant::Extended);
    assert_eq!(metadata.cell_count, 2);
    assert_eq!(metadata.load_stats.cells_loaded, 2);
    assert!((metadata.extent_area_km2() - 2.0).abs() < 1e-9);
    assert_eq!(index.unscored_count(), 2);
}
