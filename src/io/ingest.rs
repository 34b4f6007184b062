//! CSV ingest and cleaning.
//!
//! This module turns a semicolon-separated station export into a clean
//! `YearDataset` that is safe to aggregate and plot.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (drop bad rows, but report what happened)
//! - **Permissive cells**: an unparsable date or temperature never aborts the
//!   load; the row is dropped and recorded
//! - **Separation of concerns**: no aggregation or rendering logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{DailyRecord, YearDataset, YearInput};
use crate::error::AppError;

/// A row-level failure encountered during ingest.
///
/// These are deliberately non-fatal: station exports routinely contain `NA`
/// cells or short rows, and dropping them beats refusing the whole file.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the cleaned dataset plus bookkeeping for the run summary.
#[derive(Debug, Clone)]
pub struct IngestedYear {
    pub dataset: YearDataset,
    pub rows_read: usize,
    pub rows_used: usize,
    /// Rows where `min <= avg <= max` does not hold. Kept in the dataset
    /// (they render as a visually inverted band) but counted so the summary
    /// can flag a misbehaving sensor.
    pub suspect_rows: usize,
    pub row_errors: Vec<RowError>,
}

/// Column indices resolved from the header row.
struct Schema {
    date: usize,
    avg: usize,
    min: usize,
    max: usize,
}

/// Load one year's weather CSV from disk.
pub fn load_year(input: &YearInput) -> Result<IngestedYear, AppError> {
    let file = File::open(&input.path).map_err(|e| {
        AppError::input(format!(
            "Failed to open weather CSV '{}': {e}",
            input.path.display()
        ))
    })?;

    read_year(&input.label, file).map_err(|e| {
        // Prefix schema/ingest failures with the file they came from.
        AppError::new(e.exit_code(), format!("{}: {e}", input.path.display()))
    })
}

/// Ingest a weather CSV from any reader (used directly by tests).
pub fn read_year<R: Read>(label: &str, reader: R) -> Result<IngestedYear, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let schema = resolve_schema(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut suspect_rows = 0usize;
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &schema) {
            Ok(daily) => {
                if !(daily.min_temp <= daily.avg_temp && daily.avg_temp <= daily.max_temp) {
                    suspect_rows += 1;
                }
                records.push(daily);
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if records.is_empty() {
        return Err(AppError::empty(format!(
            "No valid rows remain in dataset '{label}' after cleaning."
        )));
    }

    let rows_used = records.len();

    Ok(IngestedYear {
        dataset: YearDataset {
            label: label.to_string(),
            records,
        },
        rows_read,
        rows_used,
        suspect_rows,
        row_errors,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Date"). If we don't strip it, schema validation
    // will incorrectly report a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_schema(header_map: &HashMap<String, usize>) -> Result<Schema, AppError> {
    let require = |name: &str| -> Result<usize, AppError> {
        header_map
            .get(name)
            .copied()
            .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
    };

    Ok(Schema {
        date: require("date")?,
        avg: require("av temp")?,
        min: require("min temp")?,
        max: require("max temp")?,
    })
}

fn parse_row(record: &StringRecord, schema: &Schema) -> Result<DailyRecord, String> {
    let date = get_field(record, schema.date)
        .and_then(parse_date)
        .ok_or("Missing/invalid `Date` value.")?;
    let avg_temp = get_field(record, schema.avg)
        .and_then(parse_temp)
        .ok_or("Missing/invalid `Av Temp` value.")?;
    let min_temp = get_field(record, schema.min)
        .and_then(parse_temp)
        .ok_or("Missing/invalid `Min Temp` value.")?;
    let max_temp = get_field(record, schema.max)
        .and_then(parse_temp)
        .ok_or("Missing/invalid `Max Temp` value.")?;

    Ok(DailyRecord {
        date,
        min_temp,
        avg_temp,
        max_temp,
    })
}

fn get_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    // Station exports use day-first dates. The dotted form is what the files
    // actually carry; slash and dash variants show up after spreadsheet
    // round-trips, so we accept a small fixed set.
    const FMTS: [&str; 3] = ["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_temp(s: &str) -> Option<f64> {
    // Accept a decimal comma as well as a decimal point; exports follow the
    // station's locale.
    let v = s.replace(',', ".").parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date;Av Temp;Min Temp;Max Temp\n";

    fn ingest(body: &str) -> Result<IngestedYear, AppError> {
        read_year("2024", format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn loads_valid_rows_in_file_order() {
        let year = ingest("01.02.2024;5.0;2.0;8.0\n01.03.2024;10.0;6.0;14.0\n").unwrap();

        assert_eq!(year.rows_read, 2);
        assert_eq!(year.rows_used, 2);
        assert!(year.row_errors.is_empty());

        let records = &year.dataset.records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!((records[0].avg_temp - 5.0).abs() < 1e-12);
        assert!((records[1].avg_temp - 10.0).abs() < 1e-12);
    }

    #[test]
    fn non_numeric_cell_drops_the_whole_row() {
        let year = ingest("01.02.2024;NA;2.0;8.0\n01.03.2024;10.0;6.0;14.0\n").unwrap();

        // The bad row is gone entirely, not coerced to zero.
        assert_eq!(year.rows_read, 2);
        assert_eq!(year.rows_used, 1);
        assert_eq!(year.row_errors.len(), 1);
        assert_eq!(year.row_errors[0].line, 2);
        assert!((year.dataset.records[0].avg_temp - 10.0).abs() < 1e-12);
    }

    #[test]
    fn bad_date_drops_the_row() {
        let year = ingest("2024-02-01;5.0;2.0;8.0\n01.03.2024;10.0;6.0;14.0\n").unwrap();

        // ISO dates are not day-first; the row is dropped like any other
        // malformed cell.
        assert_eq!(year.rows_used, 1);
        assert_eq!(year.row_errors.len(), 1);
    }

    #[test]
    fn day_first_variants_parse() {
        let year = ingest("01.02.2024;5.0;2.0;8.0\n02/02/2024;6.0;3.0;9.0\n03-02-2024;7.0;4.0;10.0\n")
            .unwrap();
        assert_eq!(year.rows_used, 3);
        assert_eq!(
            year.dataset.records[2].date,
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
        );
    }

    #[test]
    fn decimal_comma_temperatures_parse() {
        let year = ingest("01.02.2024;5,5;2,0;8,5\n").unwrap();
        assert!((year.dataset.records[0].avg_temp - 5.5).abs() < 1e-12);
        assert!((year.dataset.records[0].max_temp - 8.5).abs() < 1e-12);
    }

    #[test]
    fn bom_prefixed_header_still_matches_schema() {
        let data = format!("\u{feff}{HEADER}01.02.2024;5.0;2.0;8.0\n");
        let year = read_year("2024", data.as_bytes()).unwrap();
        assert_eq!(year.rows_used, 1);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let err = read_year("2024", "Date;Av Temp;Min Temp\n01.02.2024;5.0;2.0\n".as_bytes())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("max temp"));
    }

    #[test]
    fn all_rows_invalid_is_an_empty_dataset_error() {
        let err = ingest("01.02.2024;NA;NA;NA\n").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn inverted_band_rows_are_kept_but_counted() {
        let year = ingest("01.02.2024;5.0;9.0;8.0\n02.02.2024;5.0;2.0;8.0\n").unwrap();
        assert_eq!(year.rows_used, 2);
        assert_eq!(year.suspect_rows, 1);
    }

    #[test]
    fn unreadable_path_is_a_file_access_error() {
        let input = YearInput {
            label: "2024".to_string(),
            path: "/nonexistent/weather-2024.csv".into(),
        };
        let err = load_year(&input).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("weather-2024.csv"));
    }
}
