//! Grid command: report on the loaded grid
//!
//! Summarises the source, coverage and score distribution of the grid, with
//! an optional cell listing.

use super::shared::{load_configuration, load_index, print_json, setup_logging};
use crate::Result;
use crate::app::services::score_classifier::classify;
use crate::app::services::spatial_index::SpatialIndex;
use crate::cli::args::{GridArgs, OutputFormat};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Cells shown in the human listing
const LISTING_LIMIT: usize = 50;

pub async fn run_grid(args: GridArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Grid arguments: {:?}", args);

    args.common.validate()?;

    let config = load_configuration(&args.common)?;
    let index = load_index(&config, args.common.show_progress())?;

    match args.common.output_format {
        OutputFormat::Human => println!("{}", human_report(&index, args.detailed)),
        OutputFormat::Json => print_json(&json_report(&index, args.detailed))?,
    }

    info!("Grid report completed");
    Ok(())
}

/// Count cells per headline label, unscored cells under "unscored"
fn label_counts(index: &SpatialIndex) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for cell in index.iter_cells() {
        let label = cell.score.as_ref().and_then(classify).unwrap_or("unscored");
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Generate human-readable grid report
pub fn human_report(index: &SpatialIndex, detailed: bool) -> String {
    let metadata = index.metadata();
    let stats = &metadata.load_stats;

    let mut output = format!(
        "📊 Accessibility Grid Report\n\
         ============================\n\
         📁 Source: {}\n\
         🧩 Variant: {}\n\
         🔲 Cells: {}\n\
         📄 Records: {} read, {} skipped ({:.1}% loaded)\n\
         ⏱️  Load Time: {:.2}s\n\
         \n",
        metadata.source,
        metadata.variant,
        metadata.cell_count,
        stats.total_records,
        stats.records_skipped,
        stats.success_rate(),
        stats.load_duration.as_secs_f64()
    );

    if let Some(extent) = metadata.extent {
        output.push_str("🗺️  Coverage (Lambert 2008):\n");
        output.push_str(&format!(
            "   • x: {:.0} to {:.0}\n   • y: {:.0} to {:.0}\n   • Extent: {:.1} km²\n\n",
            extent.x_min,
            extent.x_max,
            extent.y_min,
            extent.y_max,
            metadata.extent_area_km2()
        ));
    }

    if !stats.errors.is_empty() {
        output.push_str(&format!(
            "⚠️  Skipped rows: {} (run with -vv for details)\n\n",
            stats.records_skipped
        ));
    }

    output.push_str("📈 Score Distribution:\n");
    let counts = label_counts(index);
    for (label, count) in &counts {
        let percentage = (*count as f64 / metadata.cell_count.max(1) as f64) * 100.0;
        output.push_str(&format!(
            "   • {}: {} cells ({:.1}%)\n",
            label, count, percentage
        ));
    }
    output.push('\n');

    if detailed {
        output.push_str("📋 Cell Listing:\n");
        output.push_str("ID         | X center   | Y center   | Size (m) | Score\n");
        output.push_str("-----------|------------|------------|----------|----------\n");
        for cell in index.iter_cells().take(LISTING_LIMIT) {
            output.push_str(&format!(
                "{:10} | {:10.1} | {:10.1} | {:8.1} | {}\n",
                cell.id,
                cell.center_x,
                cell.center_y,
                cell.size,
                cell.score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ));
        }
        if index.cell_count() > LISTING_LIMIT {
            output.push_str(&format!(
                "\n... and {} more cells (use --format json for the complete listing)\n",
                index.cell_count() - LISTING_LIMIT
            ));
        }
    } else {
        output.push_str("💡 Use --detailed flag for the cell listing\n");
    }

    output
}

/// Generate JSON grid report
pub fn json_report(index: &SpatialIndex, detailed: bool) -> Value {
    let metadata = index.metadata();

    let mut report = json!({
        "metadata": {
            "source": metadata.source,
            "variant": metadata.variant,
            "cell_count": metadata.cell_count,
            "unscored_cells": index.unscored_count(),
            "extent_lambert2008": metadata.extent,
            "extent_area_km2": metadata.extent_area_km2(),
            "loaded_at": metadata.loaded_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "load_stats": metadata.load_stats,
        },
        "score_distribution": label_counts(index),
    });

    if detailed {
        let cells: Vec<Value> = index
            .iter_cells()
            .map(|cell| serde_json::to_value(cell).unwrap_or(Value::Null))
            .collect();
        report["cells"] = Value::Array(cells);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::grid_loader::GridLoader;

    fn index() -> SpatialIndex {
        let content = "id;X_LB2008;Y_LB2008;ms_len;score\n\
                       1;500;500;1000;7\n\
                       2;1500;500;1000;5000\n\
                       3;2500;500;1000;2,5\n\
                       4;3500;500;oops;1\n";
        let result = GridLoader::new()
            .load_reader(content.as_bytes(), "cells.csv")
            .unwrap();
        SpatialIndex::from_load_result(result)
    }

    #[test]
    fn test_label_counts() {
        let counts = label_counts(&index());
        assert_eq!(counts.get("faible"), Some(&2));
        assert_eq!(counts.get("excellent"), Some(&1));
    }

    #[test]
    fn test_human_report() {
        let report = human_report(&index(), false);

        assert!(report.contains("Source: cells.csv"));
        assert!(report.contains("Cells: 3"));
        assert!(report.contains("4 read, 1 skipped"));
        assert!(report.contains("Extent: 3.0 km²"));
        assert!(report.contains("faible: 2 cells"));
        assert!(!report.contains("Cell Listing"));

        let detailed = human_report(&index(), true);
        assert!(detailed.contains("Cell Listing"));
    }

    #[test]
    fn test_json_report() {
        let report = json_report(&index(), true);

        assert_eq!(report["metadata"]["cell_count"], 3);
        assert_eq!(report["metadata"]["variant"], "simple");
        assert_eq!(report["score_distribution"]["excellent"], 1);
        assert_eq!(report["cells"].as_array().map(Vec::len), Some(3));

        let summary = json_report(&index(), false);
        assert!(summary.get("cells").is_none());
    }
}
