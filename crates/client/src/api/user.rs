use api_types::budget::{BudgetOverview, BudgetUpdate};
use api_types::user::{ProfileUpdate, UserProfile};
use serde_json::Value;

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn profile(&self) -> Result<UserProfile> {
        self.get("user/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.put("user/profile", update).await
    }

    /// Budget overview for one calendar month.
    pub async fn budget(&self, month: u32, year: i32) -> Result<BudgetOverview> {
        let query = [("month", month.to_string()), ("year", year.to_string())];
        self.get_query("user/budget", &query).await
    }

    /// Saves budget figures for a month. Callers re-fetch the overview
    /// afterwards; the response body carries nothing this client keeps.
    pub async fn update_budget(&self, update: &BudgetUpdate) -> Result<()> {
        self.post_discard("user/budget", update).await
    }

    /// Free-form settings document; this client does not interpret it.
    pub async fn settings(&self) -> Result<Value> {
        self.get("user/settings").await
    }

    pub async fn update_settings(&self, settings: &Value) -> Result<Value> {
        self.put("user/settings", settings).await
    }
}
