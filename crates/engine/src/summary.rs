//! Window aggregation: totals, category rollup and the time series.
use api_types::transaction::{TransactionKind, TransactionRecord};
use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::buckets::{TimeBucket, bucket_series};
use crate::dates::record_date;
use crate::rollup::{CategoryTotal, category_rollup};
use crate::window::ResolvedWindow;

/// Full-precision income, expense and savings sums for one window.
///
/// Amounts stay decimal all the way through; rounding happens only in the
/// formatting layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    /// Always `income - expense`; negative when spending exceeds income.
    pub savings: Decimal,
}

impl Totals {
    pub const ZERO: Totals = Totals {
        income: Decimal::ZERO,
        expense: Decimal::ZERO,
        savings: Decimal::ZERO,
    };

    /// Sums usable records, applying the same leniency as [`summarize`].
    #[must_use]
    pub fn of(records: &[TransactionRecord], tz: Tz) -> Totals {
        accumulate(&keep_usable(records, tz))
    }
}

/// A record paired with its parsed local calendar date. Only records that
/// survive [`keep_usable`] exist in this form.
pub(crate) struct DatedRecord<'a> {
    pub record: &'a TransactionRecord,
    pub date: NaiveDate,
}

/// Drops records that cannot take part in aggregation: ones without a
/// parseable date or with an unrecognized kind. Every aggregate consumes
/// the same filtered set, so the bucket sums always match the totals.
pub(crate) fn keep_usable(records: &[TransactionRecord], tz: Tz) -> Vec<DatedRecord<'_>> {
    let mut kept = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for record in records {
        let known_kind = matches!(
            record.kind,
            TransactionKind::Income | TransactionKind::Expense
        );
        let date = record.date.as_deref().and_then(|raw| record_date(raw, tz));
        match date {
            Some(date) if known_kind => kept.push(DatedRecord { record, date }),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "skipping records without a usable date or kind");
    }
    kept
}

fn accumulate(records: &[DatedRecord<'_>]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for entry in records {
        match entry.record.kind {
            TransactionKind::Income => income += entry.record.amount,
            TransactionKind::Expense => expense += entry.record.amount,
            TransactionKind::Other => {}
        }
    }
    Totals {
        income,
        expense,
        savings: income - expense,
    }
}

/// Everything the dashboard derives from one window's records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowSummary {
    pub totals: Totals,
    /// Expense sums per category, alphabetical.
    pub categories: Vec<CategoryTotal>,
    /// Chronological time series at the window's granularity.
    pub buckets: Vec<TimeBucket>,
}

/// Aggregates `records` for a resolved window.
///
/// Pure and infallible: malformed records are skipped, never fatal. The
/// caller is expected to have fetched with the window's date filters; no
/// re-filtering by range happens here.
#[must_use]
pub fn summarize(records: &[TransactionRecord], window: &ResolvedWindow) -> WindowSummary {
    let kept = keep_usable(records, window.timezone());
    WindowSummary {
        totals: accumulate(&kept),
        categories: category_rollup(&kept),
        buckets: bucket_series(&kept, window.granularity()),
    }
}
