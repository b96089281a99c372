//! Serve command: run the HTTP API until shutdown

use super::shared::{build_lookup_service, load_configuration, load_index, setup_logging};
use crate::Result;
use crate::app::adapters::http_api;
use crate::cli::args::ServeArgs;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

pub async fn run_serve(args: ServeArgs, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Serve arguments: {:?}", args);

    args.common.validate()?;

    let mut config = load_configuration(&args.common)?;
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }

    // Load before binding so a bad grid never accepts connections
    let index = load_index(&config, args.common.show_progress())?;
    let service = Arc::new(build_lookup_service(&config, index)?);
    let app = http_api::router(service);

    let listener = http_api::bind(&config.server.bind).await?;

    let signal = async move {
        // A dropped sender also ends the wait
        while !*shutdown.borrow_and_update() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
        info!("Shutdown requested, draining connections");
    };

    http_api::serve(listener, app, signal).await
}
