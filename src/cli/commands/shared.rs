//! Shared components for CLI commands
//!
//! Logging setup, layered configuration, grid loading and output helpers
//! used by every subcommand.

use crate::app::adapters::geocoder::NominatimGeocoder;
use crate::app::adapters::projection::Lambert2008;
use crate::app::services::accessibility_resolver::AccessibilityResolver;
use crate::app::services::address_lookup::AddressLookupService;
use crate::app::services::grid_loader::GridLoader;
use crate::app::services::spatial_index::SpatialIndex;
use crate::cli::args::CommonArgs;
use crate::config::{Config, parse_delimiter};
use crate::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Lookup service wired to the production geocoder and projection
pub type LiveLookupService = AddressLookupService<NominatimGeocoder, Lambert2008>;

/// Set up structured logging
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("accesstc={}", log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if args.quiet {
        // Minimal logging for quiet mode
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    // Determine config file path
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, args)?;

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &CommonArgs) -> Result<()> {
    if let Some(grid_path) = &args.grid_path {
        config.grid.path = grid_path.clone();
    }
    if let Some(delimiter) = &args.delimiter {
        config.grid.delimiter = parse_delimiter(delimiter)?;
    }
    if let Some(variant) = args.variant {
        config.grid.variant = variant;
    }

    config.logging.level = args.get_log_level().to_string();

    Ok(())
}

/// Load the grid named by the configuration into a shared index
pub fn load_index(config: &Config, show_progress: bool) -> Result<Arc<SpatialIndex>> {
    info!("Loading grid from {}", config.grid.path.display());

    let result = GridLoader::new()
        .with_delimiter(config.delimiter_byte()?)
        .with_variant(config.grid.variant)
        .with_progress(show_progress)
        .load_file(&config.grid.path)?;

    let index = SpatialIndex::from_load_result(result);
    info!(
        "Grid ready: {} {} cells",
        index.cell_count(),
        index.variant()
    );

    Ok(Arc::new(index))
}

/// Wire the lookup service over a loaded index
pub fn build_lookup_service(config: &Config, index: Arc<SpatialIndex>) -> Result<LiveLookupService> {
    let geocoder = NominatimGeocoder::new(&config.geocoder)?;
    debug!("Geocoder endpoint: {}", geocoder.base_url());

    Ok(AddressLookupService::new(
        geocoder,
        Lambert2008::new(),
        AccessibilityResolver::new(index),
    ))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::io("Failed to serialize output", e.into()))?;
    println!("{}", json);
    Ok(())
}
