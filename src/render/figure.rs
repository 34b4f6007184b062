//! Figure composition: stacked panels, shared legend, caption footnote.

use std::collections::HashSet;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::draw_err;
use super::panel::{LegendSample, PanelData, SeriesEntry, draw_panel};
use super::style::StyleConfig;
use crate::domain::{AxisRange, RenderConfig};
use crate::error::AppError;

/// Caption line under the legend, explaining the month-label convention.
pub const FOOTNOTE: &str =
    "Monthly average temperature is shown in parentheses next to month labels.";

/// The full figure description: panels in stack order plus the shared range.
#[derive(Debug, Clone)]
pub struct FigureData<'a> {
    pub panels: Vec<PanelData<'a>>,
    pub axis: AxisRange,
}

/// Deduplicate series metadata for the shared legend.
///
/// Every panel reports every series it drew; the legend shows each label
/// exactly once, keeping the first occurrence's order and swatch.
pub fn legend_entries(all: Vec<SeriesEntry>) -> Vec<SeriesEntry> {
    let mut seen = HashSet::new();
    all.into_iter().filter(|e| seen.insert(e.label)).collect()
}

/// Draw the whole figure onto `root`.
///
/// Layout: the bottom margin (legend strip + footnote strip) is carved off
/// first, then the remainder is split evenly into one slot per panel, so the
/// legend and caption can never overlap panel content.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &FigureData<'_>,
    config: &RenderConfig,
    style: &StyleConfig,
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(draw_err)?;

    let (_, height) = root.dim_in_pixel();
    let bottom = (style.legend_height + style.footnote_height) as i32;
    let split_at = (height as i32 - bottom).max(0);

    let (panel_strip, bottom_strip) = root.split_vertically(split_at);
    let slots = panel_strip.split_evenly((data.panels.len().max(1), 1));

    let mut entries = Vec::new();
    for (panel, slot) in data.panels.iter().zip(slots.iter()) {
        entries.extend(draw_panel(root, slot, panel, &data.axis, config, style)?);
    }

    let (legend_strip, footnote_strip) =
        bottom_strip.split_vertically(style.legend_height as i32);
    draw_legend(&legend_strip, &legend_entries(entries), style)?;
    draw_footnote(&footnote_strip, style)?;

    Ok(())
}

/// Horizontally arranged, unbordered legend, centered in its strip.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[SeriesEntry],
    style: &StyleConfig,
) -> Result<(), AppError> {
    let (width, height) = area.dim_in_pixel();
    let cy = height as i32 / 2;
    let swatch = style.legend_swatch as i32;
    let pad = swatch / 2;
    let gap = style.legend_font as i32;

    // Backend-independent width estimate; exact text metrics are not worth a
    // font lookup for a centered single-row legend.
    let text_px =
        |label: &str| -> i32 { (label.chars().count() as u32 * style.legend_font * 6 / 10) as i32 };

    let total: i32 = entries
        .iter()
        .map(|e| swatch + pad + text_px(e.label))
        .sum::<i32>()
        + gap * entries.len().saturating_sub(1) as i32;
    let mut x = (width as i32 - total).max(0) / 2;

    let label_style = TextStyle::from(("sans-serif", style.legend_font).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));

    for entry in entries {
        match entry.sample {
            LegendSample::Band(color) => {
                area.draw(&Rectangle::new(
                    [(x, cy - swatch / 3), (x + swatch, cy + swatch / 3)],
                    color.filled(),
                ))
                .map_err(draw_err)?;
            }
            LegendSample::Line(color, width) => {
                area.draw(&PathElement::new(
                    vec![(x, cy), (x + swatch, cy)],
                    color.stroke_width(width),
                ))
                .map_err(draw_err)?;
            }
            LegendSample::Dashed(color, width) => {
                let seg = swatch * 2 / 5;
                for start in [x, x + swatch - seg] {
                    area.draw(&PathElement::new(
                        vec![(start, cy), (start + seg, cy)],
                        color.stroke_width(width),
                    ))
                    .map_err(draw_err)?;
                }
            }
        }

        area.draw(&Text::new(
            entry.label,
            (x + swatch + pad, cy),
            label_style.clone(),
        ))
        .map_err(draw_err)?;

        x += swatch + pad + text_px(entry.label) + gap;
    }

    Ok(())
}

fn draw_footnote<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &StyleConfig,
) -> Result<(), AppError> {
    let (width, height) = area.dim_in_pixel();
    let footnote_style = TextStyle::from(("sans-serif", style.footnote_font).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    area.draw(&Text::new(
        FOOTNOTE,
        (width as i32 / 2, height as i32 / 2),
        footnote_style,
    ))
    .map_err(draw_err)?;

    Ok(())
}
