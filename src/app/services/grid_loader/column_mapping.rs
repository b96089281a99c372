//! Column mapping and variant detection for grid files
//!
//! This module analyzes the header row: trimmed names are indexed, the grid
//! variant is chosen, and the required columns of that variant are checked.

use super::schema::GridSchema;
use crate::app::models::{GridVariant, VariantSelection};
use crate::constants::columns;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

const UTF8_BOM: char = '\u{feff}';

/// Column mapping for one grid file
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Trimmed column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Column layout chosen for this file
    pub schema: GridSchema,

    /// Optional columns of the schema that the header actually carries
    pub present_optional: Vec<&'static str>,
}

impl ColumnMapping {
    /// Analyze header names, select the variant and verify required columns
    pub fn analyze(
        headers: &StringRecord,
        selection: VariantSelection,
        source: &str,
    ) -> Result<Self> {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            let column_name = header.trim_start_matches(UTF8_BOM).trim().to_string();
            // Later duplicates win, like a dict built from the header
            name_to_index.insert(column_name, index);
        }

        let variant = match selection {
            VariantSelection::Simple => GridVariant::Simple,
            VariantSelection::Extended => GridVariant::Extended,
            VariantSelection::Auto => Self::detect_variant(&name_to_index),
        };
        let schema = GridSchema::for_variant(variant);

        let missing: Vec<&str> = schema
            .required
            .iter()
            .copied()
            .filter(|column| !name_to_index.contains_key(*column))
            .collect();

        if !missing.is_empty() {
            let found: Vec<&str> = headers.iter().collect();
            return Err(Error::grid_format(
                source,
                format!(
                    "Missing columns for {} grid: {:?}. Headers found: {:?}",
                    variant, missing, found
                ),
            ));
        }

        let present_optional = schema
            .optional
            .iter()
            .copied()
            .filter(|column| name_to_index.contains_key(*column))
            .collect();

        Ok(ColumnMapping {
            name_to_index,
            schema,
            present_optional,
        })
    }

    /// A `score` column means the simple layout
    fn detect_variant(name_to_index: &HashMap<String, usize>) -> GridVariant {
        if name_to_index.contains_key(columns::SCORE) {
            GridVariant::Simple
        } else {
            GridVariant::Extended
        }
    }

    pub fn variant(&self) -> GridVariant {
        self.schema.variant
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Statistics about the mapping: (total, required, optional present)
    pub fn stats(&self) -> (usize, usize, usize) {
        (
            self.name_to_index.len(),
            self.schema.required.len(),
            self.present_optional.len(),
        )
    }
}
