//! Lookup command: resolve a projected or geographic point

use super::report::format_report;
use super::shared::{load_configuration, load_index, print_json, setup_logging};
use crate::Result;
use crate::app::adapters::geocoder::GeoPoint;
use crate::app::adapters::projection::{CoordinateProjector, Lambert2008};
use crate::app::services::accessibility_resolver::{AccessibilityReport, AccessibilityResolver};
use crate::app::services::address_lookup::ProjectedPoint;
use crate::cli::args::{LookupArgs, LookupPoint, OutputFormat};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Serialize)]
struct LookupOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    geocoding: Option<GeoPoint>,
    lambert2008: ProjectedPoint,
    #[serde(flatten)]
    report: &'a AccessibilityReport,
}

pub async fn run_lookup(args: LookupArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Lookup arguments: {:?}", args);

    args.common.validate()?;
    let point = args.point()?;

    let config = load_configuration(&args.common)?;
    let index = load_index(&config, args.common.show_progress())?;
    let resolver = AccessibilityResolver::new(index);

    let (geocoding, (x, y)) = match point {
        LookupPoint::Projected { x, y } => (None, (x, y)),
        LookupPoint::Geographic { lon, lat } => (
            Some(GeoPoint { lon, lat }),
            Lambert2008::new().project(lon, lat)?,
        ),
    };

    let report = resolver.resolve(x, y)?;
    info!("Point ({:.2}, {:.2}) is in cell {}", x, y, report.cell.id);

    let lambert2008 = ProjectedPoint { x, y };
    match args.common.output_format {
        OutputFormat::Json => print_json(&LookupOutput {
            geocoding,
            lambert2008,
            report: &report,
        })?,
        OutputFormat::Human => println!(
            "{}",
            format_report("Point lookup", geocoding.as_ref(), &lambert2008, &report)
        ),
    }

    Ok(())
}
