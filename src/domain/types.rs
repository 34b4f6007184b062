//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while composing the figure
//! - exported to CSV for downstream scripts
//! - built by hand in tests without ceremony

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;

/// One cleaned daily weather observation.
///
/// All three temperatures are guaranteed present and finite by the loader.
/// `min_temp <= avg_temp <= max_temp` is *not* enforced: station exports
/// occasionally carry inverted values and we pass them through (they are
/// counted as suspect rows and surfaced in the run summary instead).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub avg_temp: f64,
    pub max_temp: f64,
}

/// One year's worth of daily records, in file order.
///
/// The loader keeps the input row order (station exports are already
/// chronological) and never re-sorts.
#[derive(Debug, Clone)]
pub struct YearDataset {
    pub label: String,
    pub records: Vec<DailyRecord>,
}

impl YearDataset {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

/// Mean of `avg_temp` over one month bucket.
///
/// The bucket key is the first calendar day of the month. Months without any
/// surviving record are simply absent; no zero/NaN entry is ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month_start: NaiveDate,
    pub mean_avg_temp: f64,
}

/// The vertical axis range shared by every panel.
///
/// Computed once across all datasets so the stacked panels are directly
/// comparable: `y_min <= min(all min_temp) - padding` and
/// `y_max >= max(all max_temp) + padding`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisRange {
    /// Compute the shared range over every dataset, with symmetric padding.
    ///
    /// Fails with exit code 3 when any dataset has zero records: min/max are
    /// not well defined and the panels could not share a scale.
    pub fn across(datasets: &[&YearDataset], padding: f64) -> Result<AxisRange, AppError> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;

        for ds in datasets {
            if ds.records.is_empty() {
                return Err(AppError::empty(format!(
                    "Dataset '{}' has no records; cannot compute a shared axis range.",
                    ds.label
                )));
            }
            for r in &ds.records {
                lo = lo.min(r.min_temp);
                hi = hi.max(r.max_temp);
            }
        }

        if !(lo.is_finite() && hi.is_finite()) {
            return Err(AppError::empty(
                "No datasets supplied; cannot compute a shared axis range.",
            ));
        }

        Ok(AxisRange {
            y_min: lo - padding,
            y_max: hi + padding,
        })
    }

    pub fn span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// One input file keyed by its year label (`--input 2024=path.csv`).
#[derive(Debug, Clone)]
pub struct YearInput {
    pub label: String,
    pub path: PathBuf,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults). Keeping it an explicit
/// value rather than module-level constants lets callers run the pipeline on
/// an arbitrary list of (label, path) pairs with an injectable output
/// location.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Input files, one per panel, in panel order.
    pub inputs: Vec<YearInput>,

    pub out_dir: PathBuf,
    pub basename: String,

    /// Figure geometry in inches; pixel sizes are derived per backend.
    pub fig_width_in: f64,
    pub fig_height_in: f64,
    /// Raster export resolution (pixels per inch).
    pub raster_dpi: u32,
    /// Base resolution used for the vector geometry and font sizing.
    pub base_dpi: u32,

    /// Padding added above/below the observed min/max on the shared y axis.
    pub y_padding: f64,
    /// Major horizontal gridline step; minor gridlines sit at half this step.
    pub y_major_step: f64,
    /// Fraction of the date span added to the left of the first date.
    pub left_pad_fraction: f64,

    /// Optional CSV export of the per-year monthly means.
    pub export_monthly: Option<PathBuf>,
}

impl RenderConfig {
    /// Pixel dimensions of the raster artifact.
    pub fn raster_size(&self) -> (u32, u32) {
        (
            (self.fig_width_in * self.raster_dpi as f64).round() as u32,
            (self.fig_height_in * self.raster_dpi as f64).round() as u32,
        )
    }

    /// Pixel dimensions of the vector artifact (base geometry).
    pub fn vector_size(&self) -> (u32, u32) {
        (
            (self.fig_width_in * self.base_dpi as f64).round() as u32,
            (self.fig_height_in * self.base_dpi as f64).round() as u32,
        )
    }

    /// How much larger the raster geometry is than the base geometry.
    pub fn raster_scale(&self) -> f64 {
        self.raster_dpi as f64 / self.base_dpi as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, min: f64, avg: f64, max: f64) -> DailyRecord {
        DailyRecord {
            date,
            min_temp: min,
            avg_temp: avg,
            max_temp: max,
        }
    }

    #[test]
    fn axis_range_spans_all_datasets_with_padding() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let a = YearDataset {
            label: "2024".to_string(),
            records: vec![record(d, -3.0, 5.0, 12.0)],
        };
        let b = YearDataset {
            label: "2025".to_string(),
            records: vec![record(d, 1.0, 20.0, 32.0)],
        };

        let range = AxisRange::across(&[&a, &b], 2.0).unwrap();
        assert!((range.y_min - (-5.0)).abs() < 1e-12);
        assert!((range.y_max - 34.0).abs() < 1e-12);
    }

    #[test]
    fn axis_range_rejects_empty_dataset() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let a = YearDataset {
            label: "2024".to_string(),
            records: vec![record(d, -3.0, 5.0, 12.0)],
        };
        let empty = YearDataset {
            label: "2025".to_string(),
            records: Vec::new(),
        };

        let err = AxisRange::across(&[&a, &empty], 2.0).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn raster_size_is_inches_times_dpi() {
        let config = RenderConfig {
            inputs: Vec::new(),
            out_dir: PathBuf::from("."),
            basename: "weather_temperature".to_string(),
            fig_width_in: 16.0,
            fig_height_in: 20.0,
            raster_dpi: 300,
            base_dpi: 96,
            y_padding: 2.0,
            y_major_step: 2.0,
            left_pad_fraction: 0.002,
            export_monthly: None,
        };

        assert_eq!(config.raster_size(), (4800, 6000));
        assert_eq!(config.vector_size(), (1536, 1920));
        assert!((config.raster_scale() - 3.125).abs() < 1e-12);
    }
}
