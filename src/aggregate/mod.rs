//! Monthly aggregation.
//!
//! Partitions a year's daily records into month buckets (keyed by the first
//! calendar day of the month) and computes the arithmetic mean of the daily
//! average temperature per bucket. The output feeds both the x-axis tick
//! labels and the monthly-means export.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::{MonthlyAverage, YearDataset};

/// First calendar day of the month `date` falls in.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first of an existing month is always a valid date")
}

/// Mean `avg_temp` per month bucket, ascending by month start.
///
/// Months with no surviving record are absent from the output; a bucket can
/// never be empty because only existing records create one.
pub fn monthly_means(dataset: &YearDataset) -> Vec<MonthlyAverage> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for record in &dataset.records {
        let bucket = buckets.entry(month_start(record.date)).or_insert((0.0, 0));
        bucket.0 += record.avg_temp;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(start, (sum, count))| MonthlyAverage {
            month_start: start,
            mean_avg_temp: sum / count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DailyRecord;

    fn dataset(records: Vec<(NaiveDate, f64)>) -> YearDataset {
        YearDataset {
            label: "2024".to_string(),
            records: records
                .into_iter()
                .map(|(date, avg)| DailyRecord {
                    date,
                    min_temp: avg - 3.0,
                    avg_temp: avg,
                    max_temp: avg + 3.0,
                })
                .collect(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_bucket_per_month_present() {
        let ds = dataset(vec![(date(2024, 2, 1), 5.0), (date(2024, 3, 1), 10.0)]);

        let monthly = monthly_means(&ds);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month_start, date(2024, 2, 1));
        assert!((monthly[0].mean_avg_temp - 5.0).abs() < 1e-12);
        assert_eq!(monthly[1].month_start, date(2024, 3, 1));
        assert!((monthly[1].mean_avg_temp - 10.0).abs() < 1e-12);
    }

    #[test]
    fn mean_is_arithmetic_over_the_bucket() {
        let ds = dataset(vec![
            (date(2024, 2, 1), 4.0),
            (date(2024, 2, 2), 6.0),
            (date(2024, 2, 3), 8.0),
        ]);

        let monthly = monthly_means(&ds);
        assert_eq!(monthly.len(), 1);
        assert!((monthly[0].mean_avg_temp - 6.0).abs() < 1e-12);
    }

    #[test]
    fn buckets_are_keyed_by_first_of_month_not_observed_day() {
        let ds = dataset(vec![(date(2024, 7, 19), 21.0), (date(2024, 7, 25), 23.0)]);

        let monthly = monthly_means(&ds);
        assert_eq!(monthly[0].month_start, date(2024, 7, 1));
        assert!((monthly[0].mean_avg_temp - 22.0).abs() < 1e-12);
    }

    #[test]
    fn skipped_months_are_absent_and_order_is_ascending() {
        let ds = dataset(vec![
            (date(2024, 10, 1), 12.0),
            (date(2024, 2, 1), 5.0),
            (date(2024, 5, 1), 15.0),
        ]);

        let monthly = monthly_means(&ds);
        let starts: Vec<_> = monthly.iter().map(|m| m.month_start).collect();
        assert_eq!(
            starts,
            vec![date(2024, 2, 1), date(2024, 5, 1), date(2024, 10, 1)]
        );
    }

    #[test]
    fn aggregation_is_stable_under_reaggregation() {
        // Expanding each monthly mean back into a constant month and
        // re-aggregating yields the same means.
        let ds = dataset(vec![
            (date(2024, 2, 1), 4.0),
            (date(2024, 2, 15), 6.0),
            (date(2024, 3, 2), 10.0),
        ]);
        let first = monthly_means(&ds);

        let expanded = dataset(
            first
                .iter()
                .flat_map(|m| {
                    (0..3).map(move |i| {
                        (
                            m.month_start + chrono::Days::new(i),
                            m.mean_avg_temp,
                        )
                    })
                })
                .collect(),
        );
        let second = monthly_means(&expanded);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.month_start, b.month_start);
            assert!((a.mean_avg_temp - b.mean_avg_temp).abs() < 1e-9);
        }
    }
}
