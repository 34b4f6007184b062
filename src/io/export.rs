//! Export monthly means to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per (year label, month) pair.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::MonthlyAverage;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct MonthlyRow<'a> {
    label: &'a str,
    month_start: NaiveDate,
    mean_avg_temp: f64,
}

/// Write the per-year monthly means to a CSV file.
///
/// `years` pairs each dataset label with its aggregated months, in panel
/// order.
pub fn write_monthly_csv(
    path: &Path,
    years: &[(&str, &[MonthlyAverage])],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::write(format!(
            "Failed to create monthly export CSV '{}': {e}",
            path.display()
        ))
    })?;

    let mut writer = csv::Writer::from_writer(file);

    for (label, months) in years {
        for month in *months {
            writer
                .serialize(MonthlyRow {
                    label,
                    month_start: month.month_start,
                    mean_avg_temp: month.mean_avg_temp,
                })
                .map_err(|e| {
                    AppError::write(format!("Failed to write monthly export row: {e}"))
                })?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::write(format!("Failed to flush monthly export CSV: {e}")))?;

    Ok(())
}
