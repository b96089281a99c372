//! Core grid loader implementation
//!
//! This module handles file access, header validation and the record loop.
//! Structural problems abort the load; bad rows are skipped and counted.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::record_parser::parse_cell_record;
use super::stats::{LoadResult, LoadStats};
use crate::app::models::VariantSelection;
use crate::constants::DEFAULT_DELIMITER;
use crate::{Error, Result};

/// Records between progress updates
const PROGRESS_INTERVAL: usize = 10_000;

/// Loader for accessibility grid files
///
/// The loader is synchronous and reads the whole source once:
/// - Header names are trimmed and matched exactly
/// - The variant is detected from the header unless forced
/// - Rows failing conversion are skipped without aborting
/// - Zero usable rows is an error
#[derive(Debug, Clone)]
pub struct GridLoader {
    delimiter: u8,
    variant: VariantSelection,
    show_progress: bool,
}

impl Default for GridLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl GridLoader {
    /// Loader with `;` delimiter, auto-detected variant and no progress output
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
            variant: VariantSelection::Auto,
            show_progress: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_variant(mut self, variant: VariantSelection) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load a grid file from disk
    pub fn load_file(&self, path: &Path) -> Result<LoadResult> {
        info!("Loading grid file: {}", path.display());

        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let file = File::open(path).map_err(|e| {
            Error::io(format!("Failed to open grid file {}", path.display()), e)
        })?;

        self.load_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Load a grid from any reader; `source` names it in errors and metadata
    pub fn load_reader<R: Read>(&self, reader: R, source: &str) -> Result<LoadResult> {
        let start_time = Instant::now();

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing(source, "Failed to read grid header", Some(e)))?
            .clone();

        if headers.iter().all(|header| header.trim().is_empty()) {
            return Err(Error::grid_format(source, "No header row found"));
        }

        let column_mapping = ColumnMapping::analyze(&headers, self.variant, source)?;
        let (total_cols, required_cols, optional_cols) = column_mapping.stats();
        debug!(
            "Column mapping: {} total, {} required, {} optional present ({} variant)",
            total_cols,
            required_cols,
            optional_cols,
            column_mapping.variant()
        );

        let progress_bar = self.create_progress_bar(source);
        let mut stats = LoadStats::new();
        let mut cells = Vec::new();

        for result in csv_reader.records() {
            stats.total_records += 1;

            match result {
                Ok(record) => match parse_cell_record(&record, &column_mapping) {
                    Ok(cell) => {
                        cells.push(cell);
                        stats.cells_loaded += 1;
                    }
                    Err(e) => {
                        debug!("Skipped record {}: {}", stats.total_records, e);
                        stats.record_skip(format!("Record {}: {}", stats.total_records, e));
                    }
                },
                Err(e) => {
                    debug!("CSV error at record {}: {}", stats.total_records, e);
                    stats.record_skip(format!(
                        "CSV parse error at record {}: {}",
                        stats.total_records, e
                    ));
                }
            }

            if let Some(pb) = &progress_bar {
                if stats.total_records % PROGRESS_INTERVAL == 0 {
                    pb.set_message(format!("{} cells loaded", stats.cells_loaded));
                }
            }
        }

        stats.load_duration = start_time.elapsed();

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        if cells.is_empty() {
            return Err(Error::empty_grid(source));
        }

        if stats.records_skipped > 0 {
            warn!(
                "Skipped {} of {} grid records in {}",
                stats.records_skipped, stats.total_records, source
            );
        }

        info!("{}", stats.summary());

        Ok(LoadResult {
            cells,
            variant: column_mapping.variant(),
            source: source.to_string(),
            stats,
        })
    }

    fn create_progress_bar(&self, source: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("Loading grid {}", source));
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }
}
