//! The one-call dashboard load: concurrent fetches joined into an engine
//! summary plus trends.
use api_types::budget::BudgetOverview;
use api_types::transaction::TransactionQuery;
use api_types::user::UserProfile;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use engine::{AnalysisWindow, ResolvedWindow, Totals, TrendSet, WindowSummary};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ApiClient;
use crate::error::Result;

/// Transactions fetched per window, matching the page size the dashboard
/// has always requested.
const WINDOW_FETCH_LIMIT: u32 = 500;

/// Everything the dashboard renders for one window.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub summary: WindowSummary,
    pub trends: TrendSet,
    /// Monthly budget figure: the budget endpoint's value, else the
    /// profile's, else zero.
    pub monthly_budget: Decimal,
    pub budget: BudgetOverview,
    pub profile: UserProfile,
    /// Currency the trends were formatted in.
    pub currency: String,
}

impl ApiClient {
    /// Fetches and aggregates everything the dashboard shows for `window`.
    ///
    /// The window's transactions, the budget overview and the profile are
    /// all required and fetched concurrently. The previous window only
    /// feeds the trend deltas, so its failure degrades to a zero baseline
    /// instead of failing the whole load.
    pub async fn load_dashboard(&self, window: AnalysisWindow) -> Result<DashboardData> {
        let now = Utc::now().with_timezone(&self.tz);
        let resolved = window.resolve(now);
        let previous_range = resolved.previous();

        tracing::debug!(window = window.as_str(), "loading dashboard");
        let query = window_query(&resolved);
        let (page, budget, profile, previous_totals) = tokio::join!(
            self.transactions(&query),
            self.budget(now.month(), now.year()),
            self.profile(),
            self.previous_window_totals(previous_range),
        );
        let page = page?;
        let budget = budget?;
        let profile = profile?;

        let summary = engine::summarize(&page.transactions, &resolved);
        let currency = profile
            .currency
            .clone()
            .unwrap_or_else(|| "USD".to_string());
        let trends = engine::trend_set(
            &summary.totals,
            &previous_totals,
            budget.budget.remaining,
            &currency,
        );
        let monthly_budget = if budget.budget.monthly > Decimal::ZERO {
            budget.budget.monthly
        } else {
            profile.monthly_budget
        };

        Ok(DashboardData {
            summary,
            trends,
            monthly_budget,
            budget,
            profile,
            currency,
        })
    }

    /// Totals for the range right before the current window. Worst case
    /// this is cosmetic, so failures merely zero the baseline.
    async fn previous_window_totals(
        &self,
        range: Option<(DateTime<Tz>, DateTime<Tz>)>,
    ) -> Totals {
        let Some((start, end)) = range else {
            return Totals::ZERO;
        };
        let query = TransactionQuery {
            limit: Some(WINDOW_FETCH_LIMIT),
            start_date: Some(start.to_rfc3339()),
            end_date: Some(end.to_rfc3339()),
            ..TransactionQuery::default()
        };
        match self.transactions(&query).await {
            Ok(page) => Totals::of(&page.transactions, self.tz),
            Err(err) => {
                tracing::warn!(%err, "previous-window fetch failed, trends use a zero baseline");
                Totals::ZERO
            }
        }
    }
}

fn window_query(resolved: &ResolvedWindow) -> TransactionQuery {
    let mut query = TransactionQuery {
        limit: Some(WINDOW_FETCH_LIMIT),
        ..TransactionQuery::default()
    };
    // All-time sends no bounds at all.
    if let Some(start) = resolved.start {
        query.start_date = Some(start.to_rfc3339());
        query.end_date = Some(resolved.end.to_rfc3339());
    }
    query
}
