//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the cleaned daily observations (`DailyRecord`, `YearDataset`)
//! - derived aggregates (`MonthlyAverage`, `AxisRange`)
//! - the run configuration (`RenderConfig`, `YearInput`)

pub mod types;

pub use types::*;
