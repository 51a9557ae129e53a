//! Period-over-period stat movements shown next to the dashboard totals.
use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::signed_amount;
use crate::summary::Totals;

/// One stat movement, ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrendDelta {
    /// Formatted signed amount, e.g. `-$40.00`. Non-negative values carry
    /// no sign; display layers prepend `+` when they want one.
    pub value: String,
    /// Whether the movement is favorable or neutral for the user.
    pub is_positive: bool,
}

impl TrendDelta {
    fn from_amount(amount: Decimal, currency: &str) -> Self {
        Self {
            value: signed_amount(amount, currency),
            is_positive: amount >= Decimal::ZERO,
        }
    }
}

/// The four stat movements of the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrendSet {
    pub income: TrendDelta,
    pub expense: TrendDelta,
    pub savings: TrendDelta,
    /// Not a delta: the absolute budget residual for the current period.
    pub budget: TrendDelta,
}

/// Derives the dashboard trends from current and previous window totals
/// plus the period's remaining budget.
///
/// Income and savings move favorably when they grow; expense inverts the
/// sign because spending less than before is the favorable direction. A
/// previous window that failed to load is passed in as [`Totals::ZERO`],
/// which turns the deltas into the raw current figures.
#[must_use]
pub fn trend_set(
    current: &Totals,
    previous: &Totals,
    budget_remaining: Decimal,
    currency: &str,
) -> TrendSet {
    TrendSet {
        income: TrendDelta::from_amount(current.income - previous.income, currency),
        expense: TrendDelta::from_amount(previous.expense - current.expense, currency),
        savings: TrendDelta::from_amount(current.savings - previous.savings, currency),
        budget: TrendDelta::from_amount(budget_remaining, currency),
    }
}
