//! Address command: geocode an address and report its cell

use super::report::format_report;
use super::shared::{
    build_lookup_service, load_configuration, load_index, print_json, setup_logging,
};
use crate::Result;
use crate::cli::args::{AddressArgs, AddressRequest, OutputFormat};
use tracing::debug;

pub async fn run_address(args: AddressArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Address arguments: {:?}", args);

    args.common.validate()?;
    let request = args.request()?;

    let config = load_configuration(&args.common)?;
    let index = load_index(&config, args.common.show_progress())?;
    let service = build_lookup_service(&config, index)?;

    match request {
        AddressRequest::FreeText(address) => {
            let response = service.score_by_address(&address).await?;
            match args.common.output_format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Human => println!(
                    "{}",
                    format_report(
                        &response.address_input,
                        Some(&response.geocoding),
                        &response.lambert2008,
                        &response.report,
                    )
                ),
            }
        }
        AddressRequest::Structured(address) => {
            let response = service.score_structured(address).await?;
            match args.common.output_format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Human => println!(
                    "{}",
                    format_report(
                        &response.address_built_for_geocoding,
                        Some(&response.geocoding),
                        &response.lambert2008,
                        &response.report,
                    )
                ),
            }
        }
    }

    Ok(())
}
