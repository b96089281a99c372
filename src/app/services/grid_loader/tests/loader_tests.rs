//! Tests for grid loading from readers and files

use super::*;
use crate::Error;
use crate::app::models::{GridVariant, HeadlineScore, VariantSelection};
use crate::app::services::grid_loader::GridLoader;
use std::path::Path;

#[test]
fn test_load_simple_grid() {
    let result = GridLoader::new()
        .load_reader(create_simple_grid_csv().as_bytes(), "simple")
        .unwrap();

    assert_eq!(result.variant, GridVariant::Simple);
    assert_eq!(result.cells.len(), 3);
    assert_eq!(result.stats.total_records, 3);
    assert_eq!(result.stats.cells_loaded, 3);
    assert_eq!(result.stats.records_skipped, 0);
    assert_eq!(result.source, "simple");

    let ids: Vec<i64> = result.cells.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(result.cells[1].score, Some(HeadlineScore::Raw(2.5)));
}

#[test]
fn test_load_extended_grid() {
    let result = GridLoader::new()
        .load_reader(create_extended_grid_csv().as_bytes(), "extended")
        .unwrap();

    assert_eq!(result.variant, GridVariant::Extended);
    assert_eq!(result.cells.len(), 2);
    assert_eq!(result.cells[0].score, Some(HeadlineScore::Class10(5)));
    assert_eq!(result.cells[1].score, Some(HeadlineScore::Class10(7)));
}

#[test]
fn test_all_loaded_cells_have_ordered_bounds() {
    let result = GridLoader::new()
        .load_reader(create_extended_grid_csv().as_bytes(), "extended")
        .unwrap();

    for cell in &result.cells {
        assert!(cell.bounds.x_min < cell.bounds.x_max);
        assert!(cell.bounds.y_min < cell.bounds.y_max);
    }
}

#[test]
fn test_bad_rows_are_skipped_without_aborting() {
    let content = "id;X_LB2008;Y_LB2008;ms_len;score\n\
                   1;1000;1000;100;7\n\
                   2;1100;1000;abc;7\n\
                   x;1200;1000;100;7\n\
                   4;1300;1000;100;\n\
                   5;1400;1000;100;3\n";

    let result = GridLoader::new()
        .load_reader(content.as_bytes(), "mixed")
        .unwrap();

    let ids: Vec<i64> = result.cells.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 4, 5]);
    assert_eq!(result.stats.total_records, 5);
    assert_eq!(result.stats.records_skipped, 2);
    assert_eq!(result.stats.errors.len(), 2);
    assert_eq!(result.cells[1].score, None);
    assert!(result.stats.errors[0].starts_with("Record 2"));
}

#[test]
fn test_zero_valid_rows_is_fatal() {
    let content = "id;X_LB2008;Y_LB2008;ms_len;score\n\
                   1;1000;1000;abc;7\n";

    let result = GridLoader::new().load_reader(content.as_bytes(), "bad");
    assert!(matches!(result, Err(Error::EmptyGrid { .. })));
}

#[test]
fn test_header_only_is_fatal() {
    let content = "id;X_LB2008;Y_LB2008;ms_len;score\n";

    let result = GridLoader::new().load_reader(content.as_bytes(), "empty");
    assert!(matches!(result, Err(Error::EmptyGrid { .. })));
}

#[test]
fn test_empty_source_has_no_header() {
    let result = GridLoader::new().load_reader("".as_bytes(), "nothing");
    assert!(matches!(result, Err(Error::GridFormat { .. })));
}

#[test]
fn test_missing_required_column_is_fatal() {
    let content = "id;X_LB2008;Y_LB2008;score\n1;1000;1000;7\n";

    let result = GridLoader::new().load_reader(content.as_bytes(), "no-size");
    assert!(matches!(result, Err(Error::GridFormat { .. })));
}

#[test]
fn test_custom_delimiter() {
    let content = "id,X_LB2008,Y_LB2008,ms_len,score\n1,1000.5,1000,100,7\n";

    let result = GridLoader::new()
        .with_delimiter(b',')
        .load_reader(content.as_bytes(), "comma")
        .unwrap();

    assert_eq!(result.cells[0].center_x, 1000.5);
}

#[test]
fn test_quoted_fields_with_delimiter_inside() {
    let content = "id;X_LB2008;Y_LB2008;ms_len;score\n1;\"1000,5\";1000;100;\"7\"\n";

    let result = GridLoader::new()
        .load_reader(content.as_bytes(), "quoted")
        .unwrap();

    assert_eq!(result.cells[0].center_x, 1000.5);
}

#[test]
fn test_forced_variant_overrides_detection() {
    let result = GridLoader::new()
        .with_variant(VariantSelection::Extended)
        .load_reader(create_simple_grid_csv().as_bytes(), "forced")
        .unwrap();

    assert_eq!(result.variant, GridVariant::Extended);
    assert!(result.cells.iter().all(|c| c.score.is_none()));
}

#[test]
fn test_load_file_from_disk() {
    let temp_file = create_temp_file(&create_simple_grid_csv());

    let result = GridLoader::new().load_file(temp_file.path()).unwrap();
    assert_eq!(result.cells.len(), 3);
    assert_eq!(result.source, temp_file.path().display().to_string());
}

#[test]
fn test_load_missing_file() {
    let result = GridLoader::new().load_file(Path::new("/nonexistent/grid_scores.csv"));
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[test]
fn test_skip_reasons_are_capped() {
    let mut content = String::from("id;X_LB2008;Y_LB2008;ms_len;score\n1;0;0;1;1\n");
    for i in 0..150 {
        content.push_str(&format!("{};0;0;bad;1\n", i + 2));
    }

    let result = GridLoader::new()
        .load_reader(content.as_bytes(), "many")
        .unwrap();

    assert_eq!(result.stats.records_skipped, 150);
    assert_eq!(
        result.stats.errors.len(),
        crate::app::services::grid_loader::stats::MAX_RECORDED_ERRORS
    );
}
