//! Test utilities and fixtures for grid loader testing
//!
//! This module provides grid file fixtures in both variants and helpers to
//! write them to temporary files.

use csv::StringRecord;
use std::io::Write;
use tempfile::NamedTempFile;

mod loader_tests;

/// Simple variant: plain `score` column
pub fn create_simple_grid_csv() -> String {
    "id;X_LB2008;Y_LB2008;ms_len;score\n\
     1;1000,0;1000,0;100,0;7\n\
     2;1100,0;1000,0;100,0;2,5\n\
     3;1200,0;1000,0;100,0;5000\n"
        .to_string()
}

/// Extended variant: no `score`, percentile and class columns per mode
pub fn create_extended_grid_csv() -> String {
    "id;X_LB2008;Y_LB2008;ms_len;Score TC total sans TGV 24h %;Score TC train (SNCB) 24h %;Score TC MTB 24h %;Score TC total sans TGV 24h_Classe_10;Score TC train (SNCB) 24h_Classe_10;Score TC MTB 24h_Classe_10\n\
     10;525484,4046;675010,5;100;12,3456;3,1;55,0;5;2;9\n\
     11;525584,4046;675010,5;100;;0,4;;7,9;;11\n"
        .to_string()
}

/// Split a `;`-delimited line into a record
pub fn record(line: &str) -> StringRecord {
    StringRecord::from(line.split(';').collect::<Vec<_>>())
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
