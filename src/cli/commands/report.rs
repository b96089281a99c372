//! Human-readable rendering of accessibility reports

use crate::app::adapters::geocoder::GeoPoint;
use crate::app::services::accessibility_resolver::{AccessibilityReport, ModeMetric};
use crate::app::services::address_lookup::ProjectedPoint;

/// Render a report, optionally preceded by the geocoded location
pub fn format_report(
    heading: &str,
    geocoding: Option<&GeoPoint>,
    lambert2008: &ProjectedPoint,
    report: &AccessibilityReport,
) -> String {
    let cell = &report.cell;

    let mut output = format!("📍 {}\n{}\n", heading, "=".repeat(heading.chars().count() + 3));

    if let Some(point) = geocoding {
        output.push_str(&format!(
            "🌍 WGS84: lon {:.6}, lat {:.6}\n",
            point.lon, point.lat
        ));
    }
    output.push_str(&format!(
        "🗺️  Lambert 2008: x {:.2}, y {:.2}\n\n",
        lambert2008.x, lambert2008.y
    ));

    output.push_str(&format!("🔲 Cell {} ({} grid)\n", cell.id, report.variant));
    output.push_str(&format!(
        "   • Center: ({:.1}, {:.1}), size {} m\n",
        cell.center_lambert2008.x_center, cell.center_lambert2008.y_center, cell.size_meters
    ));

    match &cell.score {
        Some(score) => output.push_str(&format!(
            "   • Score: {} ({})\n",
            score,
            cell.classe.unwrap_or("unclassified")
        )),
        None => output.push_str("   • Score: none\n"),
    }
    if let Some(comment) = cell.comment {
        output.push_str(&format!("   • {}\n", comment));
    }

    if let Some(analysis) = &report.accessibility_analysis {
        output.push_str("\n🚆 Accessibility by mode:\n");
        output.push_str(&format_mode("Total (excl. TGV)", &analysis.total));
        output.push_str(&format_mode("Train (SNCB)", &analysis.train));
        output.push_str(&format_mode("MTB", &analysis.mtb));
    }

    output
}

fn format_mode(label: &str, metric: &ModeMetric) -> String {
    let percentile = metric
        .percentile
        .map(|p| format!("{:.2} %", p))
        .unwrap_or_else(|| "n/a".to_string());
    let class = metric
        .score10
        .map(|c| format!("{}/10", c))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "   • {:18} {:>9} | class {:>5} | {}\n",
        label,
        percentile,
        class,
        metric.score10_comment.unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::accessibility_resolver::AccessibilityResolver;
    use crate::app::services::grid_loader::GridLoader;
    use crate::app::services::spatial_index::SpatialIndex;
    use std::sync::Arc;

    #[test]
    fn test_format_extended_report() {
        let content = "id;X_LB2008;Y_LB2008;ms_len;Score TC total sans TGV 24h %;Score TC total sans TGV 24h_Classe_10\n\
                       7;500;500;1000;91,5;10\n";
        let result = GridLoader::new()
            .load_reader(content.as_bytes(), "test")
            .unwrap();
        let resolver = AccessibilityResolver::new(Arc::new(SpatialIndex::from_load_result(result)));
        let report = resolver.resolve(500.0, 500.0).unwrap();

        let text = format_report(
            "Point lookup",
            None,
            &ProjectedPoint { x: 500.0, y: 500.0 },
            &report,
        );

        assert!(text.contains("Cell 7 (extended grid)"));
        assert!(text.contains("Score: 10/10 (excellente)"));
        assert!(text.contains("Accessibilité exceptionnelle"));
        assert!(text.contains("91.50 %"));
        assert!(!text.contains("WGS84"));
    }
}
