//! One year's panel: envelope bands, trend line, reference lines, month
//! ticks/guides, titles.
//!
//! The panel never talks to the legend directly. Every drawn series is
//! described by a returned [`SeriesEntry`]; the figure composer deduplicates
//! those when it builds the shared legend. This keeps panels order
//! independent: there is no "first panel registers the labels" coupling.

use chrono::{Days, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::draw_err;
use super::style::StyleConfig;
use crate::domain::{AxisRange, MonthlyAverage, RenderConfig, YearDataset};
use crate::error::AppError;

pub const LOW_BAND_LABEL: &str = "Lowest daily temperature";
pub const HIGH_BAND_LABEL: &str = "Highest daily temperature";
pub const TREND_LABEL: &str = "Average daily temperature";
pub const REF_ZERO_LABEL: &str = "0°C";
pub const REF_THIRTY_LABEL: &str = "30°C";

/// Fixed horizontal reference thresholds (°C), drawn dashed in every panel.
pub const REFERENCE_LINES: [f64; 2] = [0.0, 30.0];

/// How to draw one legend swatch.
#[derive(Debug, Clone, Copy)]
pub enum LegendSample {
    /// Filled box (envelope bands).
    Band(RGBAColor),
    /// Solid line segment.
    Line(RGBColor, u32),
    /// Dashed line segment.
    Dashed(RGBColor, u32),
}

/// Legend metadata for one drawn series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesEntry {
    pub label: &'static str,
    pub sample: LegendSample,
}

/// Everything one panel needs, in panel order.
#[derive(Debug, Clone, Copy)]
pub struct PanelData<'a> {
    /// Zero-based position in the stack; determines the title letter.
    pub index: usize,
    pub dataset: &'a YearDataset,
    pub monthly: &'a [MonthlyAverage],
}

/// Sequence letter for a panel title: a, b, c, …
pub fn panel_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Month tick label: full month name plus that month's mean, e.g.
/// `February (5.0°C)`.
pub fn format_month_label(month: &MonthlyAverage) -> String {
    format!(
        "{} ({:.1}°C)",
        month.month_start.format("%B"),
        month.mean_avg_temp
    )
}

/// Horizontal axis range for one dataset.
///
/// The left edge sits slightly before the first date; the right edge stops
/// exactly at the last date. Dates are whole-day coordinates, so the
/// fractional left pad rounds up to at least one day, which doubles as the
/// minimum-span fallback for single-day datasets.
pub fn x_range(dataset: &YearDataset, left_pad_fraction: f64) -> Option<(NaiveDate, NaiveDate)> {
    let first = dataset.first_date()?;
    let last = dataset.last_date()?;
    let span_days = (last - first).num_days().max(0) as f64;
    let pad_days = ((span_days * left_pad_fraction).ceil() as u64).max(1);
    Some((first - Days::new(pad_days), last))
}

/// Draw one panel into `area` and return its legend metadata.
///
/// `figure` is the whole figure's drawing area; the title and month labels
/// are placed on it in absolute pixel coordinates, because they live outside
/// the panel's cartesian plot area.
pub fn draw_panel<DB: DrawingBackend>(
    figure: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    panel: &PanelData<'_>,
    axis: &AxisRange,
    config: &RenderConfig,
    style: &StyleConfig,
) -> Result<Vec<SeriesEntry>, AppError> {
    let records = &panel.dataset.records;
    let (x0, x1) = x_range(panel.dataset, config.left_pad_fraction).ok_or_else(|| {
        AppError::empty(format!(
            "Dataset '{}' has no records to draw.",
            panel.dataset.label
        ))
    })?;

    let mut chart = ChartBuilder::on(area)
        .margin_left(style.margin)
        .margin_right(style.margin)
        .margin_top(style.title_area)
        .margin_bottom(style.margin)
        .x_label_area_size(style.x_label_area)
        .y_label_area_size(style.y_label_area)
        .build_cartesian_2d(x0..x1, axis.y_min..axis.y_max)
        .map_err(draw_err)?;

    // Horizontal gridlines only: majors at the configured step, one light
    // line between majors (= half step). Month ticks are drawn by hand below,
    // so the stock x axis is disabled entirely.
    let y_label_count = (axis.span() / config.y_major_step).round().max(1.0) as usize + 1;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_labels(y_label_count)
        .y_max_light_lines(1)
        .bold_line_style(BLACK.mix(style.major_grid_alpha))
        .light_line_style(BLACK.mix(style.minor_grid_alpha))
        .axis_style(BLACK.stroke_width(1))
        .y_desc("Temperature (°C)")
        .axis_desc_style(("sans-serif", style.axis_label_font).into_font())
        .y_label_style(("sans-serif", style.tick_font).into_font())
        .y_label_formatter(&|v: &f64| format!("{v:.0}"))
        .draw()
        .map_err(draw_err)?;

    // Envelope bands: a closed polygon per band, lower curve forward then
    // upper curve back.
    let low_band: Vec<(NaiveDate, f64)> = records
        .iter()
        .map(|r| (r.date, r.min_temp))
        .chain(records.iter().rev().map(|r| (r.date, r.avg_temp)))
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(
            low_band,
            style.low_band.mix(style.band_alpha).filled(),
        )))
        .map_err(draw_err)?;

    let high_band: Vec<(NaiveDate, f64)> = records
        .iter()
        .map(|r| (r.date, r.avg_temp))
        .chain(records.iter().rev().map(|r| (r.date, r.max_temp)))
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(
            high_band,
            style.high_band.mix(style.band_alpha).filled(),
        )))
        .map_err(draw_err)?;

    // Average-temperature trend.
    chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.date, r.avg_temp)),
            style.trend.stroke_width(style.trend_width),
        ))
        .map_err(draw_err)?;

    // Fixed reference thresholds. Values outside the shared range would land
    // outside the plot frame, so they are skipped (the legend entry stays).
    for (value, color) in [
        (REFERENCE_LINES[0], style.ref_zero),
        (REFERENCE_LINES[1], style.ref_thirty),
    ] {
        if value < axis.y_min || value > axis.y_max {
            continue;
        }
        chart
            .draw_series(DashedLineSeries::new(
                [(x0, value), (x1, value)],
                style.ref_dash_size,
                style.ref_dash_gap,
                color.stroke_width(style.ref_width),
            ))
            .map_err(draw_err)?;
    }

    // Light vertical guide at each month start.
    for month in panel.monthly {
        chart
            .draw_series(DashedLineSeries::new(
                [
                    (month.month_start, axis.y_min),
                    (month.month_start, axis.y_max),
                ],
                style.guide_dash_size,
                style.guide_dash_gap,
                style
                    .month_guide
                    .mix(style.guide_alpha)
                    .stroke_width(style.guide_width),
            ))
            .map_err(draw_err)?;
    }

    // Month tick labels, centered under their month-start position.
    let (plot_x, plot_y) = chart.plotting_area().get_pixel_range();
    let label_y = plot_y.end + style.month_label_gap as i32;
    let month_style = TextStyle::from(("sans-serif", style.month_label_font).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    for month in panel.monthly {
        let (px, _) = chart.backend_coord(&(month.month_start, axis.y_min));
        figure
            .draw(&Text::new(
                format_month_label(month),
                (px, label_y),
                month_style.clone(),
            ))
            .map_err(draw_err)?;
    }

    // Left-aligned panel title above the plot frame: "(a) 2024".
    let (_, area_y) = area.get_pixel_range();
    let title_style = TextStyle::from(("sans-serif", style.title_font).into_font());
    figure
        .draw(&Text::new(
            format!("({}) {}", panel_letter(panel.index), panel.dataset.label),
            (plot_x.start, area_y.start + style.margin as i32 / 2),
            title_style,
        ))
        .map_err(draw_err)?;

    Ok(vec![
        SeriesEntry {
            label: LOW_BAND_LABEL,
            sample: LegendSample::Band(style.low_band.mix(style.band_alpha)),
        },
        SeriesEntry {
            label: HIGH_BAND_LABEL,
            sample: LegendSample::Band(style.high_band.mix(style.band_alpha)),
        },
        SeriesEntry {
            label: TREND_LABEL,
            sample: LegendSample::Line(style.trend, style.trend_width),
        },
        SeriesEntry {
            label: REF_ZERO_LABEL,
            sample: LegendSample::Dashed(style.ref_zero, style.ref_width),
        },
        SeriesEntry {
            label: REF_THIRTY_LABEL,
            sample: LegendSample::Dashed(style.ref_thirty, style.ref_width),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DailyRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset(dates: &[NaiveDate]) -> YearDataset {
        YearDataset {
            label: "2024".to_string(),
            records: dates
                .iter()
                .map(|&d| DailyRecord {
                    date: d,
                    min_temp: 2.0,
                    avg_temp: 5.0,
                    max_temp: 8.0,
                })
                .collect(),
        }
    }

    #[test]
    fn panel_letters_run_from_a() {
        assert_eq!(panel_letter(0), 'a');
        assert_eq!(panel_letter(1), 'b');
        assert_eq!(panel_letter(2), 'c');
    }

    #[test]
    fn month_label_shows_name_and_one_decimal_mean() {
        let month = MonthlyAverage {
            month_start: date(2024, 2, 1),
            mean_avg_temp: 5.0,
        };
        assert_eq!(format_month_label(&month), "February (5.0°C)");

        let month = MonthlyAverage {
            month_start: date(2024, 7, 1),
            mean_avg_temp: 21.37,
        };
        assert_eq!(format_month_label(&month), "July (21.4°C)");
    }

    #[test]
    fn x_range_pads_left_and_stops_at_last_date() {
        let ds = dataset(&[date(2024, 2, 1), date(2024, 10, 31)]);
        let (x0, x1) = x_range(&ds, 0.002).unwrap();

        // 273-day span * 0.002 rounds up to one whole day of padding.
        assert_eq!(x0, date(2024, 1, 31));
        assert_eq!(x1, date(2024, 10, 31));
    }

    #[test]
    fn single_day_dataset_falls_back_to_a_one_day_span() {
        let ds = dataset(&[date(2024, 2, 1)]);
        let (x0, x1) = x_range(&ds, 0.002).unwrap();

        assert_eq!(x0, date(2024, 1, 31));
        assert_eq!(x1, date(2024, 2, 1));
        assert!(x0 < x1);
    }

    #[test]
    fn five_distinct_series_labels() {
        let labels = [
            LOW_BAND_LABEL,
            HIGH_BAND_LABEL,
            TREND_LABEL,
            REF_ZERO_LABEL,
            REF_THIRTY_LABEL,
        ];
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), 5);
    }
}
