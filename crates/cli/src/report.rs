//! Plain-text rendering of engine results
//!
//! Renderers return strings so the binary decides where they go and tests
//! can inspect them.

use crate::output::{format_count, format_decimal};
use aerocoord_core::config::OutputConfig;
use aerocoord_geo::batch::BatchSummary;
use aerocoord_geo::{dms_display, Analysis, Axis, EnclosingCircle, Extraction};

/// One token per line
pub fn render_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Valid tokens, one per line
pub fn render_extraction(extraction: &Extraction) -> String {
    render_tokens(&extraction.canonical())
}

/// Center (decimal and DMS) and radius of a circle
pub fn render_circle(circle: &EnclosingCircle, output: &OutputConfig) -> String {
    let center = circle.center;
    format!(
        "Center: {}\n        {} {}\nRadius: {:.2} NM ({:.2} km)",
        format_decimal(center.latitude, center.longitude, output.decimal_places),
        dms_display(center.latitude, Axis::Latitude),
        dms_display(center.longitude, Axis::Longitude),
        circle.radius_nm,
        circle.radius_km(),
    )
}

/// Full report for one analyzed text
pub fn render_analysis(analysis: &Analysis, output: &OutputConfig) -> String {
    let extraction = &analysis.extraction;
    let mut sections = vec![format!(
        "Coordinates: {}, {}",
        format_count(extraction.valid.len(), "valid", "valid"),
        format_count(extraction.invalid.len(), "invalid", "invalid"),
    )];

    if !analysis.ordered.is_empty() {
        sections.push(format!("Polygon order:\n{}", indent(&render_tokens(&analysis.ordered))));
        sections.push(format!(
            "Polygon: {}",
            if analysis.simple_polygon { "simple" } else { "self-intersecting" }
        ));
    }

    if !analysis.trimmed.is_empty() {
        sections.push(format!("Trimmed:\n{}", indent(&render_tokens(&analysis.trimmed))));
    }

    sections.push(format!("Extremities:\n{}", indent(&analysis.extremities)));

    if let Some(circle) = &analysis.circle {
        sections.push(format!("Enclosing circle:\n{}", indent(&render_circle(circle, output))));
    }

    if !extraction.invalid.is_empty() {
        let invalid: Vec<String> = extraction.invalid.iter().map(ToString::to_string).collect();
        sections.push(format!("Invalid candidates:\n{}", indent(&render_tokens(&invalid))));
    }

    sections.join("\n\n")
}

/// One-line totals for a batch run
pub fn render_batch_summary(summary: &BatchSummary) -> String {
    format!(
        "{}: {}, {}, {} without coordinates",
        format_count(summary.documents, "document", "documents"),
        format_count(summary.valid, "valid coordinate", "valid coordinates"),
        format_count(summary.invalid, "invalid candidate", "invalid candidates"),
        summary.empty,
    )
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
