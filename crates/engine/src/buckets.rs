//! The chronological income/expense series behind the dashboard chart.
use std::collections::BTreeMap;

use api_types::transaction::TransactionKind;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::summary::DatedRecord;
use crate::window::Granularity;

/// One slice of the dashboard time series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeBucket {
    /// Stable identity: `YYYY-MM` for months, `YYYY-MM-DD` for days.
    pub key: String,
    /// Display text such as `Jan 2024` or `Jan 5`. Ordering never depends
    /// on it.
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Default)]
struct SliceSums {
    income: Decimal,
    expense: Decimal,
}

/// Groups records into per-slice sums, ascending chronologically.
///
/// Slices are keyed by their first calendar day while accumulating, which
/// keeps ordering purely chronological; keys and labels are derived at the
/// end and the date key is not part of the output.
pub(crate) fn bucket_series(records: &[DatedRecord<'_>], granularity: Granularity) -> Vec<TimeBucket> {
    let mut slices: BTreeMap<NaiveDate, SliceSums> = BTreeMap::new();
    for entry in records {
        let slice = match granularity {
            Granularity::Month => entry.date.with_day(1).unwrap_or(entry.date),
            Granularity::Day => entry.date,
        };
        let sums = slices.entry(slice).or_default();
        match entry.record.kind {
            TransactionKind::Income => sums.income += entry.record.amount,
            TransactionKind::Expense => sums.expense += entry.record.amount,
            TransactionKind::Other => {}
        }
    }
    slices
        .into_iter()
        .map(|(slice, sums)| TimeBucket {
            key: match granularity {
                Granularity::Month => slice.format("%Y-%m").to_string(),
                Granularity::Day => slice.format("%Y-%m-%d").to_string(),
            },
            label: match granularity {
                Granularity::Month => slice.format("%b %Y").to_string(),
                Granularity::Day => slice.format("%b %-d").to_string(),
            },
            income: sums.income,
            expense: sums.expense,
        })
        .collect()
}
