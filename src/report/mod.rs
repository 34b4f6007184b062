//! Run summary formatting.
//!
//! We keep formatting code in one place so:
//! - the pipeline stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::RenderConfig;
use crate::render::panel::{format_month_label, panel_letter};

/// How many dropped-row details to print before collapsing to a count.
const MAX_ROW_ERRORS_SHOWN: usize = 5;

/// Format the full run summary: per-year ingest stats, monthly means, and
/// the shared axis range.
pub fn format_run_summary(run: &RunOutput, config: &RenderConfig) -> String {
    let mut out = String::new();

    out.push_str("=== tenv - daily temperature comparison ===\n");
    out.push_str(&format!(
        "Panels: {} | shared y-range: [{:.1}, {:.1}] °C (padding {:.1})\n",
        run.years.len(),
        run.axis.y_min,
        run.axis.y_max,
        config.y_padding,
    ));

    for (index, year) in run.years.iter().enumerate() {
        let ingest = &year.ingest;
        let dataset = &ingest.dataset;

        out.push_str(&format!(
            "\n({}) {}\n",
            panel_letter(index),
            dataset.label
        ));

        let dropped = ingest.rows_read - ingest.rows_used;
        out.push_str(&format!(
            "  rows: {} read / {} used / {} dropped",
            ingest.rows_read, ingest.rows_used, dropped
        ));
        if ingest.suspect_rows > 0 {
            out.push_str(&format!(
                " | {} suspect (min/avg/max out of order)",
                ingest.suspect_rows
            ));
        }
        out.push('\n');

        if let (Some(first), Some(last)) = (dataset.first_date(), dataset.last_date()) {
            out.push_str(&format!("  span: {first} → {last}\n"));
        }

        let months: Vec<String> = year.monthly.iter().map(format_month_label).collect();
        out.push_str(&format!("  months: {}\n", months.join(", ")));

        if !ingest.row_errors.is_empty() {
            out.push_str("  dropped rows:\n");
            for err in ingest.row_errors.iter().take(MAX_ROW_ERRORS_SHOWN) {
                out.push_str(&format!("    line {}: {}\n", err.line, err.message));
            }
            let hidden = ingest.row_errors.len().saturating_sub(MAX_ROW_ERRORS_SHOWN);
            if hidden > 0 {
                out.push_str(&format!("    (+{hidden} more)\n"));
            }
        }
    }

    out
}
