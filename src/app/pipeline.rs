//! Shared pipeline logic used by both `render` and `inspect`.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> monthly aggregation -> shared axis range -> figure description
//!
//! The subcommands then focus on presentation (summary printing vs drawing).

use crate::aggregate;
use crate::domain::{AxisRange, MonthlyAverage, RenderConfig, YearDataset};
use crate::error::AppError;
use crate::io::ingest::{self, IngestedYear};
use crate::render::{FigureData, PanelData};

/// One loaded + aggregated input.
#[derive(Debug, Clone)]
pub struct YearRun {
    pub ingest: IngestedYear,
    pub monthly: Vec<MonthlyAverage>,
}

/// All computed outputs of a single run, in panel order.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub years: Vec<YearRun>,
    pub axis: AxisRange,
}

impl RunOutput {
    /// Borrowed figure description for the renderer.
    pub fn figure_data(&self) -> FigureData<'_> {
        FigureData {
            panels: self
                .years
                .iter()
                .enumerate()
                .map(|(index, year)| PanelData {
                    index,
                    dataset: &year.ingest.dataset,
                    monthly: &year.monthly,
                })
                .collect(),
            axis: self.axis,
        }
    }

    /// (label, months) pairs for the monthly-means export.
    pub fn monthly_by_label(&self) -> Vec<(&str, &[MonthlyAverage])> {
        self.years
            .iter()
            .map(|year| (year.ingest.dataset.label.as_str(), year.monthly.as_slice()))
            .collect()
    }
}

/// Execute the data side of the pipeline (everything up to drawing).
pub fn prepare(config: &RenderConfig) -> Result<RunOutput, AppError> {
    let mut years = Vec::with_capacity(config.inputs.len());
    for input in &config.inputs {
        let ingested = ingest::load_year(input)?;
        let monthly = aggregate::monthly_means(&ingested.dataset);
        years.push(YearRun {
            ingest: ingested,
            monthly,
        });
    }

    let datasets: Vec<&YearDataset> = years.iter().map(|y| &y.ingest.dataset).collect();
    let axis = AxisRange::across(&datasets, config.y_padding)?;

    Ok(RunOutput { years, axis })
}
