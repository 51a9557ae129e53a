//! Per-category expense totals.
use std::collections::BTreeMap;

use api_types::transaction::TransactionKind;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::summary::DatedRecord;

/// Expense sum for one category within the analyzed window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Groups expense records by category name, alphabetical by category.
///
/// Income never enters the rollup, and expenses without a category have
/// nothing to group under, so they are left out. Both still count toward
/// the window totals.
pub(crate) fn category_rollup(records: &[DatedRecord<'_>]) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for entry in records {
        if entry.record.kind != TransactionKind::Expense {
            continue;
        }
        let Some(category) = entry.record.category.as_deref() else {
            continue;
        };
        *groups.entry(category).or_insert(Decimal::ZERO) += entry.record.amount;
    }
    groups
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect()
}
