//! Input/output helpers.
//!
//! - weather CSV ingest + validation (`ingest`)
//! - monthly means export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
