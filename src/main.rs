use accesstc::cli::{
    args::{Args, Commands},
    commands,
};
use clap::Parser;
use std::process;
use std::time::Duration;
use tokio::sync::watch;

/// Time the server gets to drain connections after CTRL+C
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let graceful = matches!(command, Commands::Serve(_));

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        let command = commands::run(command, shutdown_rx);
        tokio::pin!(command);

        tokio::select! {
            result = &mut command => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                let interrupted = || accesstc::Error::processing_interrupted("Interrupted by user");

                if graceful {
                    let _ = shutdown_tx.send(true);
                    tokio::time::timeout(SHUTDOWN_GRACE, &mut command)
                        .await
                        .unwrap_or_else(|_| Err(interrupted()))
                } else {
                    Err(interrupted())
                }
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("AccessTC - Public-transport accessibility for Belgian addresses");
    println!("===============================================================");
    println!();
    println!("Look up accessibility scores from a grid of scored cells expressed");
    println!("in Belgian Lambert 2008 coordinates.");
    println!();
    println!("USAGE:");
    println!("    accesstc <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Serve the HTTP API (/ping, /score_by_address, /score_structured)");
    println!("    lookup      Look up the cell containing a point");
    println!("    address     Geocode an address and look up its score");
    println!("    grid        Report on the loaded grid");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve the API on the default address (127.0.0.1:8000):");
    println!("    accesstc serve --grid grid_scores.csv");
    println!();
    println!("    # Score an address:");
    println!("    accesstc address \"Rue de la Loi 16, 1000 Bruxelles\"");
    println!("    accesstc address --street \"Rue de la Loi\" --number 16 --postal-code 1000");
    println!();
    println!("    # Look up a point:");
    println!("    accesstc lookup --lon 4.3525 --lat 50.8467");
    println!("    accesstc lookup --x 648855 --y 670700 --format json");
    println!();
    println!("    # Summarise the grid:");
    println!("    accesstc grid --detailed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    accesstc <COMMAND> --help");
}
