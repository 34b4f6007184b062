//! The figure's look-and-feel as one immutable value.
//!
//! Keeping styling in an explicit `StyleConfig` (rather than ambient global
//! state) means two differently-styled renders can coexist in one process,
//! and the raster pass can scale a copy without touching the original.
//!
//! Pixel-based fields are expressed at the base geometry (`base_dpi`); the
//! raster export calls [`StyleConfig::scaled`] with the dpi ratio.

use plotters::style::RGBColor;

/// Colors, fonts (px), line widths (px) and layout reserves (px).
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Fill for the min→avg band.
    pub low_band: RGBColor,
    /// Fill for the avg→max band.
    pub high_band: RGBColor,
    /// Average-temperature trend line.
    pub trend: RGBColor,
    /// 0°C reference line.
    pub ref_zero: RGBColor,
    /// 30°C reference line.
    pub ref_thirty: RGBColor,
    /// Vertical month-start guide lines.
    pub month_guide: RGBColor,

    pub band_alpha: f64,
    pub guide_alpha: f64,
    pub major_grid_alpha: f64,
    pub minor_grid_alpha: f64,

    pub title_font: u32,
    pub axis_label_font: u32,
    pub tick_font: u32,
    pub month_label_font: u32,
    pub legend_font: u32,
    pub footnote_font: u32,

    pub trend_width: u32,
    pub ref_width: u32,
    pub guide_width: u32,

    /// Dash pattern for the reference lines.
    pub ref_dash_size: u32,
    pub ref_dash_gap: u32,
    /// Dash pattern for the month guides.
    pub guide_dash_size: u32,
    pub guide_dash_gap: u32,

    pub margin: u32,
    pub y_label_area: u32,
    pub x_label_area: u32,
    /// Vertical space reserved above each panel for its title.
    pub title_area: u32,
    /// Gap between the plot frame and the month labels below it.
    pub month_label_gap: u32,

    pub legend_height: u32,
    pub footnote_height: u32,
    /// Width of one legend swatch.
    pub legend_swatch: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            low_band: RGBColor(0x4a, 0x90, 0xe2),
            high_band: RGBColor(0xe7, 0x4c, 0x3c),
            trend: RGBColor(0x2e, 0x8b, 0x57),
            ref_zero: RGBColor(0x34, 0x98, 0xdb),
            ref_thirty: RGBColor(0xc0, 0x39, 0x2b),
            month_guide: RGBColor(0x99, 0x99, 0x99),

            band_alpha: 0.25,
            guide_alpha: 0.5,
            major_grid_alpha: 0.35,
            minor_grid_alpha: 0.15,

            title_font: 19,
            axis_label_font: 19,
            tick_font: 16,
            month_label_font: 16,
            legend_font: 19,
            footnote_font: 16,

            trend_width: 2,
            ref_width: 2,
            guide_width: 1,

            ref_dash_size: 8,
            ref_dash_gap: 5,
            guide_dash_size: 5,
            guide_dash_gap: 5,

            margin: 10,
            y_label_area: 70,
            x_label_area: 34,
            title_area: 30,
            month_label_gap: 6,

            legend_height: 46,
            footnote_height: 34,
            legend_swatch: 28,
        }
    }
}

impl StyleConfig {
    /// A copy with every pixel-based field multiplied by `factor`.
    ///
    /// Colors and alphas are resolution independent and stay untouched.
    pub fn scaled(&self, factor: f64) -> StyleConfig {
        let px = |v: u32| -> u32 { ((v as f64 * factor).round() as u32).max(1) };

        StyleConfig {
            title_font: px(self.title_font),
            axis_label_font: px(self.axis_label_font),
            tick_font: px(self.tick_font),
            month_label_font: px(self.month_label_font),
            legend_font: px(self.legend_font),
            footnote_font: px(self.footnote_font),

            trend_width: px(self.trend_width),
            ref_width: px(self.ref_width),
            guide_width: px(self.guide_width),

            ref_dash_size: px(self.ref_dash_size),
            ref_dash_gap: px(self.ref_dash_gap),
            guide_dash_size: px(self.guide_dash_size),
            guide_dash_gap: px(self.guide_dash_gap),

            margin: px(self.margin),
            y_label_area: px(self.y_label_area),
            x_label_area: px(self.x_label_area),
            title_area: px(self.title_area),
            month_label_gap: px(self.month_label_gap),

            legend_height: px(self.legend_height),
            footnote_height: px(self.footnote_height),
            legend_swatch: px(self.legend_swatch),

            ..self.clone()
        }
    }
}
