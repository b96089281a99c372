//! Grid variant descriptors
//!
//! A schema lists the columns a variant needs, the metric columns it reads when
//! present, and where the headline score comes from.

use crate::app::models::GridVariant;
use crate::constants::columns;

/// Where a cell's headline score is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlineRule {
    /// Mandatory raw float column
    RawColumn(&'static str),
    /// Integer class read from one of the optional columns
    Class10Column(&'static str),
}

/// Column layout of one grid variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSchema {
    pub variant: GridVariant,
    pub required: Vec<&'static str>,
    pub optional: Vec<&'static str>,
    pub headline: HeadlineRule,
}

impl GridSchema {
    pub fn simple() -> Self {
        let mut required = columns::BASE_REQUIRED.to_vec();
        required.push(columns::SCORE);

        Self {
            variant: GridVariant::Simple,
            required,
            optional: Vec::new(),
            headline: HeadlineRule::RawColumn(columns::SCORE),
        }
    }

    pub fn extended() -> Self {
        Self {
            variant: GridVariant::Extended,
            required: columns::BASE_REQUIRED.to_vec(),
            optional: columns::EXTENDED_OPTIONAL.to_vec(),
            headline: HeadlineRule::Class10Column(columns::TOTAL_CLASS10),
        }
    }

    pub fn for_variant(variant: GridVariant) -> Self {
        match variant {
            GridVariant::Simple => Self::simple(),
            GridVariant::Extended => Self::extended(),
        }
    }

    /// Whether an optional column holds an integer class rather than a percentile
    pub fn is_class_column(column: &str) -> bool {
        column.ends_with(columns::CLASS_SUFFIX)
    }
}
