//! Command-line parsing for the temperature comparison renderer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline and drawing code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::YearInput;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "tenv",
    version,
    about = "Stacked-panel daily temperature comparison figures (PNG + SVG)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the datasets, print the run summary, and write the PNG + SVG figure.
    Render(RenderArgs),
    /// Load and aggregate only; print the run summary without drawing.
    ///
    /// Useful for checking what a station export contains (dropped rows,
    /// suspect rows, monthly means) before committing to a figure.
    Inspect(RenderArgs),
}

/// Common options for rendering and inspecting.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Input dataset as LABEL=PATH; repeat once per panel, in stack order.
    #[arg(short = 'i', long = "input", value_parser = parse_year_input, required = true)]
    pub inputs: Vec<YearInput>,

    /// Output directory for the figure artifacts.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Base filename (`<basename>.png` / `<basename>.svg`).
    #[arg(long, default_value = "weather_temperature")]
    pub basename: String,

    /// Figure width in inches.
    #[arg(long, default_value_t = 16.0)]
    pub width: f64,

    /// Figure height in inches.
    #[arg(long, default_value_t = 20.0)]
    pub height: f64,

    /// Raster export resolution (pixels per inch).
    #[arg(long, default_value_t = 300)]
    pub raster_dpi: u32,

    /// Base resolution used for the vector geometry and font sizing.
    #[arg(long, default_value_t = 96)]
    pub base_dpi: u32,

    /// Padding (°C) added above and below the observed extremes on the
    /// shared vertical axis.
    #[arg(long, default_value_t = 2.0)]
    pub y_padding: f64,

    /// Major horizontal gridline step (°C); minor gridlines sit at half this
    /// step.
    #[arg(long, default_value_t = 2.0)]
    pub y_step: f64,

    /// Fraction of the date span used as left padding before the first date.
    #[arg(long, default_value_t = 0.002)]
    pub left_pad: f64,

    /// Export the per-year monthly means to a CSV file.
    #[arg(long, value_name = "CSV")]
    pub export_monthly: Option<PathBuf>,
}

fn parse_year_input(s: &str) -> Result<YearInput, String> {
    let (label, path) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected LABEL=PATH, got '{s}'"))?;

    let label = label.trim();
    if label.is_empty() {
        return Err(format!("Empty label in input '{s}'"));
    }
    if path.trim().is_empty() {
        return Err(format!("Empty path in input '{s}'"));
    }

    Ok(YearInput {
        label: label.to_string(),
        path: PathBuf::from(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_parses_label_and_path() {
        let input = parse_year_input("2024=data/weather-2024.csv").unwrap();
        assert_eq!(input.label, "2024");
        assert_eq!(input.path, PathBuf::from("data/weather-2024.csv"));
    }

    #[test]
    fn input_without_separator_is_rejected() {
        assert!(parse_year_input("weather-2024.csv").is_err());
        assert!(parse_year_input("=weather.csv").is_err());
        assert!(parse_year_input("2024=").is_err());
    }
}
