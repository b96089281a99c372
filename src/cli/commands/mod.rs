//! Command implementations for the AccessTC CLI
//!
//! Each subcommand lives in its own module:
//! - `serve`: HTTP API over the loaded grid
//! - `lookup`: cell for a Lambert 2008 or WGS84 point
//! - `address`: geocoded address lookup
//! - `grid`: grid summary and listing

pub mod address;
pub mod grid;
pub mod lookup;
pub mod report;
pub mod serve;
pub mod shared;

use crate::cli::args::Commands;
use crate::Result;
use tokio::sync::watch;

/// Main command runner
///
/// `shutdown` flips to `true` when the process is asked to stop; only the
/// long-running `serve` command listens to it.
pub async fn run(command: Commands, shutdown: watch::Receiver<bool>) -> Result<()> {
    match command {
        Commands::Serve(args) => serve::run_serve(args, shutdown).await,
        Commands::Lookup(args) => lookup::run_lookup(args).await,
        Commands::Address(args) => address::run_address(args).await,
        Commands::Grid(args) => grid::run_grid(args).await,
    }
}
