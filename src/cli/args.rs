//! Command-line argument definitions for AccessTC
//!
//! This module defines the complete CLI interface using clap derive API.
//! Every subcommand shares the grid, configuration and logging flags of
//! [`CommonArgs`].

use crate::app::models::VariantSelection;
use crate::app::services::address_lookup::StructuredAddress;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the AccessTC accessibility service
///
/// Looks up public-transport accessibility scores of Belgian addresses from a
/// grid of scored cells in Lambert 2008 coordinates.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "accesstc",
    version,
    about = "Public-transport accessibility scores for Belgian addresses",
    long_about = "Loads a grid of public-transport accessibility scores expressed in Belgian \
                  Lambert 2008 coordinates and answers lookups by address, by geographic \
                  coordinates or by projected coordinates, from the command line or over HTTP."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Look up the cell containing a point
    Lookup(LookupArgs),
    /// Geocode an address and look up its score
    Address(AddressArgs),
    /// Report on the loaded grid
    Grid(GridArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Grid file to load
    ///
    /// Semicolon-delimited text with comma decimals. Defaults to
    /// grid_scores.csv in the working directory.
    #[arg(
        short = 'g',
        long = "grid",
        value_name = "FILE",
        help = "Path to the grid file"
    )]
    pub grid_path: Option<PathBuf>,

    /// Field delimiter of the grid file
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        help = "Field delimiter of the grid file (default ';')"
    )]
    pub delimiter: Option<String>,

    /// Grid variant, detected from the header when auto
    #[arg(
        long = "variant",
        value_name = "VARIANT",
        help = "Grid variant: auto, simple or extended"
    )]
    pub variant: Option<VariantSelection>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/accesstc/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Address and port to listen on
    #[arg(
        short = 'b',
        long = "bind",
        value_name = "ADDR",
        help = "Address to listen on (default 127.0.0.1:8000)"
    )]
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Lambert 2008 easting in metres
    #[arg(long = "x", requires = "y", conflicts_with_all = ["lon", "lat"], allow_negative_numbers = true)]
    pub x: Option<f64>,

    /// Lambert 2008 northing in metres
    #[arg(long = "y", requires = "x", allow_negative_numbers = true)]
    pub y: Option<f64>,

    /// WGS84 longitude in degrees
    #[arg(long = "lon", requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// WGS84 latitude in degrees
    #[arg(long = "lat", requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,
}

/// Point given to the lookup command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupPoint {
    Projected { x: f64, y: f64 },
    Geographic { lon: f64, lat: f64 },
}

#[derive(Debug, Clone, Parser)]
pub struct AddressArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Free-text address
    #[arg(value_name = "TEXT", conflicts_with_all = ["street", "number", "postal_code", "city"])]
    pub text: Option<String>,

    #[arg(long = "street", requires_all = ["number", "postal_code"])]
    pub street: Option<String>,

    #[arg(long = "number")]
    pub number: Option<String>,

    #[arg(long = "postal-code")]
    pub postal_code: Option<String>,

    #[arg(long = "city")]
    pub city: Option<String>,
}

/// Address given to the address command
#[derive(Debug, Clone, PartialEq)]
pub enum AddressRequest {
    FreeText(String),
    Structured(StructuredAddress),
}

#[derive(Debug, Clone, Parser)]
pub struct GridArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Include the full cell listing
    #[arg(long = "detailed", help = "Include every cell in the report")]
    pub detailed: bool,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Serve(args) => &args.common,
            Commands::Lookup(args) => &args.common,
            Commands::Address(args) => &args.common,
            Commands::Grid(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(grid_path) = &self.grid_path {
            if grid_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Grid path is a directory: {}",
                    grid_path.display()
                )));
            }
        }

        Ok(())
    }
}

impl LookupArgs {
    /// Resolve the flags into a single point
    pub fn point(&self) -> Result<LookupPoint> {
        match (self.x, self.y, self.lon, self.lat) {
            (Some(x), Some(y), None, None) => Ok(LookupPoint::Projected { x, y }),
            (None, None, Some(lon), Some(lat)) => Ok(LookupPoint::Geographic { lon, lat }),
            _ => Err(Error::configuration(
                "Give either --x and --y or --lon and --lat",
            )),
        }
    }
}

impl AddressArgs {
    /// Resolve the flags into a free-text or structured address
    pub fn request(&self) -> Result<AddressRequest> {
        if let Some(text) = &self.text {
            return Ok(AddressRequest::FreeText(text.clone()));
        }

        match (&self.street, &self.number, &self.postal_code) {
            (Some(street), Some(number), Some(postal_code)) => {
                Ok(AddressRequest::Structured(StructuredAddress {
                    street: street.clone(),
                    number: number.clone(),
                    postal_code: postal_code.clone(),
                    city: self.city.clone(),
                }))
            }
            _ => Err(Error::configuration(
                "Give an address or --street, --number and --postal-code",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Commands {
        let args = Args::try_parse_from(argv).unwrap();
        args.command.unwrap()
    }

    #[test]
    fn test_log_level() {
        let mut args = CommonArgs::default();

        // Default level
        assert_eq!(args.get_log_level(), "warn");

        // Verbose levels
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        // Quiet mode
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_common_flags_on_subcommand() {
        let command = parse(&[
            "accesstc", "grid", "--grid", "cells.csv", "--variant", "extended", "-vv", "--format",
            "json", "--detailed",
        ]);

        let Commands::Grid(args) = &command else {
            panic!("expected grid command");
        };
        assert!(args.detailed);
        assert_eq!(command.common().grid_path, Some(PathBuf::from("cells.csv")));
        assert_eq!(command.common().variant, Some(VariantSelection::Extended));
        assert_eq!(command.common().verbose, 2);
        assert_eq!(command.common().output_format, OutputFormat::Json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["accesstc", "grid", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_lookup_point() {
        let Commands::Lookup(args) = parse(&["accesstc", "lookup", "--x", "648855", "--y", "670700"])
        else {
            panic!("expected lookup command");
        };
        assert_eq!(
            args.point().unwrap(),
            LookupPoint::Projected {
                x: 648855.0,
                y: 670700.0
            }
        );

        let Commands::Lookup(args) = parse(&["accesstc", "lookup", "--lon", "4.35", "--lat", "50.85"])
        else {
            panic!("expected lookup command");
        };
        assert_eq!(
            args.point().unwrap(),
            LookupPoint::Geographic {
                lon: 4.35,
                lat: 50.85
            }
        );

        let Commands::Lookup(args) = parse(&["accesstc", "lookup"]) else {
            panic!("expected lookup command");
        };
        assert!(args.point().is_err());

        assert!(Args::try_parse_from(["accesstc", "lookup", "--x", "1"]).is_err());
        assert!(
            Args::try_parse_from(["accesstc", "lookup", "--x", "1", "--y", "2", "--lon", "4"])
                .is_err()
        );
    }

    #[test]
    fn test_address_request() {
        let Commands::Address(args) = parse(&["accesstc", "address", "Grand-Place 1, Bruxelles"])
        else {
            panic!("expected address command");
        };
        assert_eq!(
            args.request().unwrap(),
            AddressRequest::FreeText("Grand-Place 1, Bruxelles".to_string())
        );

        let Commands::Address(args) = parse(&[
            "accesstc",
            "address",
            "--street",
            "Rue de la Loi",
            "--number",
            "16",
            "--postal-code",
            "1000",
        ]) else {
            panic!("expected address command");
        };
        let AddressRequest::Structured(address) = args.request().unwrap() else {
            panic!("expected structured address");
        };
        assert_eq!(address.street, "Rue de la Loi");
        assert_eq!(address.city, None);

        assert!(
            Args::try_parse_from(["accesstc", "address", "--street", "Rue de la Loi"]).is_err()
        );
    }

    #[test]
    fn test_common_validation() {
        let temp_dir = TempDir::new().unwrap();

        let args = CommonArgs {
            grid_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        let args = CommonArgs {
            config_file: Some(PathBuf::from("/nonexistent/config.toml")),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        assert!(CommonArgs::default().validate().is_ok());
    }
}
