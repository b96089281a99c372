//! Application constants for AccessTC
//!
//! This module contains the grid column names, classification tables,
//! projection parameters and service defaults used throughout the crate.

// =============================================================================
// Grid File Format
// =============================================================================

/// Field delimiter used by the published grid files
pub const DEFAULT_DELIMITER: char = ';';

/// Default grid file name, resolved against the working directory
pub const DEFAULT_GRID_FILE: &str = "grid_scores.csv";

/// Grid column names
pub mod columns {
    pub const ID: &str = "id";
    pub const X: &str = "X_LB2008";
    pub const Y: &str = "Y_LB2008";
    pub const SIZE: &str = "ms_len";

    /// Headline score column of the simple grid variant
    pub const SCORE: &str = "score";

    pub const TOTAL_PERCENTILE: &str = "Score TC total sans TGV 24h %";
    pub const TRAIN_PERCENTILE: &str = "Score TC train (SNCB) 24h %";
    pub const MTB_PERCENTILE: &str = "Score TC MTB 24h %";
    pub const TOTAL_CLASS10: &str = "Score TC total sans TGV 24h_Classe_10";
    pub const TRAIN_CLASS10: &str = "Score TC train (SNCB) 24h_Classe_10";
    pub const MTB_CLASS10: &str = "Score TC MTB 24h_Classe_10";

    /// Suffix marking an integer class column
    pub const CLASS_SUFFIX: &str = "_Classe_10";

    /// Columns every grid variant must carry
    pub const BASE_REQUIRED: &[&str] = &[ID, X, Y, SIZE];

    /// Metric columns read by the extended variant when present
    pub const EXTENDED_OPTIONAL: &[&str] = &[
        TOTAL_PERCENTILE,
        TRAIN_PERCENTILE,
        MTB_PERCENTILE,
        TOTAL_CLASS10,
        TRAIN_CLASS10,
        MTB_CLASS10,
    ];
}

// =============================================================================
// Classification
// =============================================================================

/// Comments for class-10 scores, index 0 is class 1
pub const CLASS10_COMMENTS: [&str; 10] = [
    "Accessibilité très faible",
    "Accessibilité faible",
    "Inférieure à la moyenne",
    "Légèrement inférieure à la moyenne",
    "Moyenne",
    "Légèrement supérieure à la moyenne",
    "Bonne accessibilité",
    "Très bonne accessibilité",
    "Excellente accessibilité",
    "Accessibilité exceptionnelle",
];

/// Headline bands for class-10 scores
pub mod class10_bands {
    pub const VERY_LOW: &str = "très faible";
    pub const LOW_TO_AVERAGE: &str = "faible à moyenne";
    pub const AVERAGE_TO_FAIR: &str = "moyenne à correcte";
    pub const GOOD_TO_VERY_GOOD: &str = "bonne à très bonne";
    pub const EXCELLENT: &str = "excellente";
}

/// Raw-score thresholds and labels of the simple grid variant
pub mod thresholds {
    pub const FIRST: f64 = 1000.0;
    pub const SECOND: f64 = 3.0;
    pub const THIRD: f64 = 6.0;

    pub const LOW: &str = "faible";
    pub const AVERAGE: &str = "moyen";
    pub const GOOD: &str = "bon";
    pub const EXCELLENT: &str = "excellent";
}

// =============================================================================
// Belgian Lambert 2008 (EPSG:3812)
// =============================================================================

pub mod lambert2008 {
    /// GRS80 semi-major axis in metres
    pub const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
    /// GRS80 inverse flattening
    pub const INVERSE_FLATTENING: f64 = 298.257_222_101;

    /// 49°50'
    pub const STANDARD_PARALLEL_1: f64 = 49.0 + 50.0 / 60.0;
    /// 51°10'
    pub const STANDARD_PARALLEL_2: f64 = 51.0 + 10.0 / 60.0;
    /// 50°47'52.134"
    pub const LATITUDE_OF_ORIGIN: f64 = 50.0 + 47.0 / 60.0 + 52.134 / 3600.0;
    /// 4°21'33.177"
    pub const CENTRAL_MERIDIAN: f64 = 4.0 + 21.0 / 60.0 + 33.177 / 3600.0;

    pub const FALSE_EASTING: f64 = 649_328.0;
    pub const FALSE_NORTHING: f64 = 665_262.0;
}

// =============================================================================
// Geocoding and Service Defaults
// =============================================================================

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "AccessTC-app/1.0";
pub const DEFAULT_COUNTRY_CODES: &str = "be";
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

/// Country suffix appended to structured addresses
pub const ADDRESS_COUNTRY: &str = "Belgique";

pub const MIN_ADDRESS_LEN: usize = 4;
pub const MIN_STREET_LEN: usize = 2;
pub const MIN_NUMBER_LEN: usize = 1;
pub const POSTAL_CODE_LEN: usize = 4;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

/// Error details returned by the HTTP API
pub const ADDRESS_NOT_FOUND_DETAIL: &str = "Adresse introuvable";
pub const NOT_COVERED_DETAIL: &str = "Adresse hors de la zone de la grille";

/// Environment variables read by the layered configuration
pub mod env {
    pub const GRID_PATH: &str = "ACCESSTC_GRID_PATH";
    pub const GRID_DELIMITER: &str = "ACCESSTC_GRID_DELIMITER";
    pub const GRID_VARIANT: &str = "ACCESSTC_GRID_VARIANT";
    pub const GEOCODER_URL: &str = "ACCESSTC_GEOCODER_URL";
    pub const USER_AGENT: &str = "ACCESSTC_USER_AGENT";
    pub const BIND: &str = "ACCESSTC_BIND";
}

/// Application directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "accesstc";
pub const CONFIG_FILE_NAME: &str = "config.toml";
