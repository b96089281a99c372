//! Field parsing utilities for grid records
//!
//! Grid files use a comma as decimal separator. Every numeric helper here
//! normalizes the separator before parsing and rejects non-finite values.

use super::column_mapping::ColumnMapping;
use super::schema::GridSchema;
use crate::app::models::MetricValue;
use crate::{Error, Result};
use csv::StringRecord;

/// Replace every decimal comma with a period
pub fn normalize_decimal(value: &str) -> String {
    value.trim().replace(',', ".")
}

/// Parse a comma-decimal float such as `525484,4046`
pub fn parse_locale_f64(value: &str) -> Result<f64> {
    let normalized = normalize_decimal(value);
    let parsed = normalized.parse::<f64>().map_err(|e| {
        Error::data_validation(format!("Invalid number '{}' ({})", value.trim(), e))
    })?;

    if !parsed.is_finite() {
        return Err(Error::data_validation(format!(
            "Non-finite number '{}'",
            value.trim()
        )));
    }

    Ok(parsed)
}

/// Parse a class value: float first, then truncated toward zero
pub fn parse_locale_class(value: &str) -> Result<i64> {
    let parsed = parse_locale_f64(value)?;
    if parsed < i64::MIN as f64 || parsed > i64::MAX as f64 {
        return Err(Error::data_validation(format!(
            "Class value '{}' out of integer range",
            value.trim()
        )));
    }
    Ok(parsed.trunc() as i64)
}

/// Round to two decimal places
///
/// Rounds the exact binary value with ties to even, so `2.675` (stored as
/// `2.67499...`) gives `2.67` and `0.125` gives `0.12`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse::<f64>().unwrap_or(value)
}

/// Parse a required float field from a grid record
pub fn parse_required_f64(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<f64> {
    let value_str = get_required_field(record, mapping, field_name)?;

    parse_locale_f64(value_str).map_err(|e| {
        Error::data_validation(format!("Invalid value for {}: {}", field_name, e))
    })
}

/// Parse a required integer field from a grid record
pub fn parse_required_i64(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<i64> {
    let value_str = get_required_field(record, mapping, field_name)?;

    value_str.parse::<i64>().map_err(|e| {
        Error::data_validation(format!(
            "Invalid integer format for {}: '{}' ({})",
            field_name, value_str, e
        ))
    })
}

/// Parse an optional metric column; any problem yields `None`
pub fn parse_optional_metric(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<MetricValue> {
    let value_str = get_optional_field(record, mapping, field_name)?;

    if GridSchema::is_class_column(field_name) {
        parse_locale_class(value_str).ok().map(MetricValue::Class)
    } else {
        parse_locale_f64(value_str)
            .ok()
            .map(|value| MetricValue::Percentile(round2(value)))
    }
}

/// Get a required field value from a grid record
pub fn get_required_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<&'a str> {
    let index = mapping.get_index(field_name).ok_or_else(|| {
        Error::data_validation(format!("Required column '{}' not found", field_name))
    })?;

    let value = record.get(index).ok_or_else(|| {
        Error::data_validation(format!("No value for required column '{}'", field_name))
    })?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::data_validation(format!(
            "Empty value for required column '{}'",
            field_name
        )));
    }

    Ok(trimmed)
}

/// Get an optional field value from a grid record
pub fn get_optional_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    mapping
        .get_index(field_name)
        .and_then(|index| record.get(index))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
