//! Individual record parsing for grid files
//!
//! This module converts one CSV record into a [`Cell`], reading the mandatory
//! geometry, the optional metric columns and the headline score.

use csv::StringRecord;
use std::collections::BTreeMap;

use super::column_mapping::ColumnMapping;
use super::field_parsers::{
    get_optional_field, parse_locale_f64, parse_optional_metric, parse_required_f64,
    parse_required_i64,
};
use super::schema::HeadlineRule;
use crate::Result;
use crate::app::models::{Cell, HeadlineScore, MetricValue};
use crate::constants::columns;

/// Parse a single grid record into a cell
pub fn parse_cell_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<Cell> {
    let id = parse_required_i64(record, mapping, columns::ID)?;
    let center_x = parse_required_f64(record, mapping, columns::X)?;
    let center_y = parse_required_f64(record, mapping, columns::Y)?;
    let size = parse_required_f64(record, mapping, columns::SIZE)?;

    let extras = parse_metrics(record, mapping);

    let score = match mapping.schema.headline {
        HeadlineRule::RawColumn(column) => get_optional_field(record, mapping, column)
            .and_then(|value| parse_locale_f64(value).ok())
            .map(HeadlineScore::Raw),
        HeadlineRule::Class10Column(column) => extras
            .get(column)
            .copied()
            .flatten()
            .and_then(|value| value.as_class())
            .map(HeadlineScore::Class10),
    };

    Cell::new(id, center_x, center_y, size, score, extras)
}

/// Parse every optional column of the schema, recording `None` for absent values
pub fn parse_metrics(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> BTreeMap<String, Option<MetricValue>> {
    mapping
        .schema
        .optional
        .iter()
        .map(|column| {
            (
                column.to_string(),
                parse_optional_metric(record, mapping, column),
            )
        })
        .collect()
}
