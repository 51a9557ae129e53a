use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform wrapper returned by every backend endpoint.
///
/// `data` is absent or null whenever `success` is false and must not be
/// consumed in that case.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    /// Server emission time, RFC3339.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Field-level validation details; shape is left to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub email: String,
        pub password: String,
        pub name: String,
    }

    /// `data` body of login/register responses.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuthPayload {
        pub uid: String,
        pub email: String,
        #[serde(default)]
        pub name: String,
        /// Short-lived bearer token. Stored only when `refresh_token` is
        /// also present; a lone token is unusable.
        #[serde(default)]
        pub id_token: Option<String>,
        #[serde(default)]
        pub refresh_token: Option<String>,
        /// Lifetime in seconds, as a string (identity-provider convention).
        #[serde(default)]
        pub expires_in: Option<String>,
        #[serde(default)]
        pub profile: Option<user::UserProfile>,
    }

    /// `data` body of `GET /auth/verify`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VerifiedUser {
        pub uid: String,
        pub email: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub email_verified: bool,
    }

    /// Slice of the login payload cached on the device between sessions.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserSummary {
        pub uid: String,
        pub email: String,
        #[serde(default)]
        pub name: String,
    }

    /// Success body of the identity provider's token-exchange endpoint.
    ///
    /// This wire is snake_case, unlike the backend.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenExchangeResponse {
        #[serde(default)]
        pub id_token: Option<String>,
        #[serde(default)]
        pub refresh_token: Option<String>,
    }
}

pub mod user {
    use super::*;
    use rust_decimal::Decimal;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserProfile {
        #[serde(default)]
        pub uid: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub name: String,
        /// ISO 4217 code; absent profiles fall back to USD at call sites.
        #[serde(default)]
        pub currency: Option<String>,
        #[serde(default)]
        pub monthly_budget: Decimal,
        #[serde(default)]
        pub savings_goal: Decimal,
        /// Free-form preference document, not interpreted by this client.
        #[serde(default)]
        pub preferences: Option<Value>,
        #[serde(default)]
        pub created_at: Option<String>,
        #[serde(default)]
        pub updated_at: Option<String>,
    }

    /// Request body for `PUT /user/profile`. The form sends the full
    /// document, not a patch.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileUpdate {
        pub name: String,
        pub currency: String,
        pub monthly_budget: Decimal,
        pub savings_goal: Decimal,
        pub preferences: Value,
    }
}

pub mod budget {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    /// `data` body of `GET /user/budget?month=&year=`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetOverview {
        pub period: BudgetPeriod,
        pub budget: BudgetFigures,
        #[serde(default)]
        pub category_breakdown: Vec<CategoryShare>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetPeriod {
        pub month: u32,
        pub year: i32,
        #[serde(default)]
        pub days_remaining: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetFigures {
        #[serde(default)]
        pub monthly: Decimal,
        #[serde(default)]
        pub spent: Decimal,
        /// Residual for the period; may go negative when overspent.
        #[serde(default)]
        pub remaining: Decimal,
        #[serde(default)]
        pub percentage_used: Decimal,
        #[serde(default)]
        pub daily_budget: Decimal,
        /// Backend-assigned label such as `on_track` or `over_budget`.
        #[serde(default)]
        pub status: String,
        #[serde(default)]
        pub savings_goal: Option<Decimal>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryShare {
        pub category: String,
        pub amount: Decimal,
        /// Pre-formatted percentage string, e.g. `"42.0"`.
        #[serde(default)]
        pub percentage: Option<String>,
    }

    /// Request body for `POST /user/budget`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub month: u32,
        pub year: i32,
        pub monthly_budget: Decimal,
        pub savings_goal: Decimal,
        #[serde(default)]
        pub category_budgets: HashMap<String, Decimal>,
    }
}

pub mod transaction {
    use super::*;
    use rust_decimal::Decimal;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", from = "String")]
    pub enum TransactionKind {
        Income,
        Expense,
        /// Kinds this client does not know. Aggregation skips them.
        #[default]
        Other,
    }

    impl From<String> for TransactionKind {
        fn from(raw: String) -> Self {
            match raw.as_str() {
                "income" => Self::Income,
                "expense" => Self::Expense,
                _ => Self::Other,
            }
        }
    }

    impl TransactionKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
                Self::Other => "other",
            }
        }
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionRecord {
        /// Server-issued opaque id.
        #[serde(default)]
        pub id: Option<String>,
        #[serde(rename = "type", default)]
        pub kind: TransactionKind,
        /// Decimal on the wire; summed downstream at full precision.
        #[serde(default)]
        pub amount: Decimal,
        #[serde(default)]
        pub category: Option<String>,
        /// RFC3339 or plain `YYYY-MM-DD`. Kept raw because records with
        /// unparseable dates are skipped by aggregation, not rejected.
        #[serde(default)]
        pub date: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
    }

    /// Request body for `POST /transactions`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NewTransaction {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: Decimal,
        pub category: String,
        pub date: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }

    /// Request body for `PUT /transactions/{id}`; absent fields are left
    /// unchanged by the backend.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUpdate {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<Decimal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }

    /// Query filters for `GET /transactions`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionQuery {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub page: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub limit: Option<u32>,
        /// Inclusive RFC3339 lower bound, forwarded as `startDate`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub start_date: Option<String>,
        /// Inclusive RFC3339 upper bound, forwarded as `endDate`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub end_date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionSummary {
        #[serde(default)]
        pub total_income: Decimal,
        #[serde(default)]
        pub total_expenses: Decimal,
        #[serde(default)]
        pub total_savings: Decimal,
        #[serde(default)]
        pub count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Pagination {
        #[serde(default)]
        pub page: u32,
        #[serde(default)]
        pub limit: u32,
        #[serde(default)]
        pub total: u64,
        #[serde(default)]
        pub total_pages: u32,
    }

    /// `data` body of `GET /transactions`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionPage {
        #[serde(default)]
        pub transactions: Vec<TransactionRecord>,
        #[serde(default)]
        pub summary: Option<TransactionSummary>,
        #[serde(default)]
        pub pagination: Option<Pagination>,
    }
}

pub mod insight {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::Map;

    /// Analysis window accepted by `POST /insights/analyze`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum AnalysisPeriod {
        #[serde(rename = "last_7_days")]
        Last7Days,
        #[serde(rename = "last_30_days")]
        Last30Days,
        #[serde(rename = "this_month")]
        ThisMonth,
    }

    impl AnalysisPeriod {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Last7Days => "last_7_days",
                Self::Last30Days => "last_30_days",
                Self::ThisMonth => "this_month",
            }
        }
    }

    /// Known insight record kinds; anything else lands in `Other` so new
    /// backend kinds degrade gracefully instead of failing the parse.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", from = "String")]
    pub enum InsightKind {
        Greeting,
        Recommendation,
        Summary,
        SpendingOverview,
        Spending,
        Savings,
        SavingsProgress,
        TopCategory,
        Risk,
        Opportunity,
        #[default]
        Other,
    }

    impl From<String> for InsightKind {
        fn from(raw: String) -> Self {
            match raw.as_str() {
                "greeting" => Self::Greeting,
                "recommendation" => Self::Recommendation,
                "summary" => Self::Summary,
                "spending_overview" => Self::SpendingOverview,
                "spending" => Self::Spending,
                "savings" => Self::Savings,
                "savings_progress" => Self::SavingsProgress,
                "top_category" => Self::TopCategory,
                "risk" => Self::Risk,
                "opportunity" => Self::Opportunity,
                _ => Self::Other,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", from = "String")]
    pub enum Priority {
        Low,
        Medium,
        High,
        Other,
    }

    impl From<String> for Priority {
        fn from(raw: String) -> Self {
            match raw.as_str() {
                "low" => Self::Low,
                "medium" => Self::Medium,
                "high" => Self::High,
                _ => Self::Other,
            }
        }
    }

    /// One generated insight. The backend varies fields per kind, so most
    /// are optional and unmodeled leftovers are kept in `extra`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct InsightBlock {
        #[serde(rename = "type", default)]
        pub kind: InsightKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        /// Body text; the backend uses either `insight` or `message`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub insight: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub icon: Option<String>,
        /// Model confidence in `[0, 1]`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub confidence: Option<f64>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub highlights: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub tips: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub priority: Option<Priority>,
        /// Kind-specific payload, not interpreted by this client.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub data: Option<Value>,
        #[serde(flatten)]
        pub extra: Map<String, Value>,
    }

    impl InsightBlock {
        /// Body text regardless of which key the backend used.
        pub fn body(&self) -> Option<&str> {
            self.insight.as_deref().or(self.message.as_deref())
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TopCategory {
        pub category: String,
        pub amount: Decimal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AnalysisSummary {
        #[serde(default)]
        pub total_transactions: u64,
        #[serde(default)]
        pub total_expenses: Decimal,
        #[serde(default)]
        pub total_income: Decimal,
        #[serde(default)]
        pub total_savings: Decimal,
        #[serde(default)]
        pub top_categories: Vec<TopCategory>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AnalysisMetadata {
        #[serde(default)]
        pub analyzed_transactions: Option<u64>,
        #[serde(default)]
        pub generated_at: Option<String>,
        #[serde(default)]
        pub ml_model: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InsightsReport {
        #[serde(default)]
        pub insights: Vec<InsightBlock>,
        #[serde(default)]
        pub summary: Option<AnalysisSummary>,
        #[serde(default)]
        pub has_data: bool,
    }

    /// `data` body of `POST /insights/analyze`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AnalyzeResponse {
        #[serde(default)]
        pub analysis: Option<InsightsReport>,
        #[serde(default)]
        pub metadata: Option<AnalysisMetadata>,
    }

    /// Request body for `POST /insights/analyze`. Transactions are optional;
    /// without them the backend analyzes server-side data for the period.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AnalyzeRequest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub transactions: Option<Vec<transaction::TransactionRecord>>,
        pub period: AnalysisPeriod,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatRequest {
        pub message: String,
    }

    /// `data` body of `POST /insights/chat`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        #[serde(default)]
        pub response: String,
        #[serde(default)]
        pub suggestions: Vec<String>,
    }

    /// A previously generated analysis as returned by history listing.
    /// Shape varies by backend version; unmodeled fields stay in `extra`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StoredInsight {
        #[serde(default)]
        pub id: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
        #[serde(flatten)]
        pub extra: Map<String, Value>,
    }

    /// `data` body of `GET /insights/history`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryPage {
        #[serde(default)]
        pub insights: Vec<StoredInsight>,
        #[serde(default)]
        pub pagination: Option<transaction::Pagination>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ChatRole {
        User,
        Assistant,
    }

    impl ChatRole {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::User => "user",
                Self::Assistant => "assistant",
            }
        }
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ConversationEntry {
        pub role: ChatRole,
        pub content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub timestamp: Option<String>,
    }

    /// Request body for `POST /ai/chat`, the free-form advisor endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdvisorChatRequest {
        pub message: String,
        #[serde(default)]
        pub conversation_history: Vec<ConversationEntry>,
    }

    /// `data` body of `POST /ai/chat`; carries the whole updated history.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdvisorChatReply {
        #[serde(default)]
        pub message: String,
        #[serde(default)]
        pub conversation_history: Vec<ConversationEntry>,
        #[serde(default)]
        pub timestamp: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::{TransactionKind, TransactionRecord};
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn envelope_failure_without_data() {
        let raw = r#"{"success":false,"message":"Amount is required","timestamp":"2024-01-05T10:00:00Z"}"#;
        let envelope: Envelope<transaction::TransactionPage> =
            serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message, "Amount is required");
    }

    #[test]
    fn transaction_kind_tolerates_unknown_values() {
        let raw = r#"{"id":"t1","type":"transfer","amount":12.5,"category":"Misc","date":"2024-01-05"}"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.kind, TransactionKind::Other);
        assert_eq!(record.amount, Decimal::new(125, 1));
    }

    #[test]
    fn transaction_amount_keeps_wire_precision() {
        let raw = r#"{"type":"expense","amount":0.1,"category":"Food","date":"2024-01-05"}"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.amount.to_string(), "0.1");
    }

    #[test]
    fn insight_block_keeps_unmodeled_fields() {
        let raw = r#"{
            "type": "savings_progress",
            "title": "On track",
            "insight": "You saved 12% more than last month.",
            "confidence": 0.82,
            "priority": "high",
            "goalApproach": "linear"
        }"#;
        let block: insight::InsightBlock = serde_json::from_str(raw).unwrap();
        assert_eq!(block.kind, insight::InsightKind::SavingsProgress);
        assert_eq!(block.priority, Some(insight::Priority::High));
        assert_eq!(block.body(), Some("You saved 12% more than last month."));
        assert_eq!(
            block.extra.get("goalApproach").and_then(Value::as_str),
            Some("linear")
        );
    }

    #[test]
    fn insight_kind_unknown_string_degrades_to_other() {
        let raw = r#"{"type":"forecast","message":"hi"}"#;
        let block: insight::InsightBlock = serde_json::from_str(raw).unwrap();
        assert_eq!(block.kind, insight::InsightKind::Other);
        assert_eq!(block.body(), Some("hi"));
    }

    #[test]
    fn transaction_query_serializes_camel_case_filters() {
        let query = transaction::TransactionQuery {
            kind: Some(TransactionKind::Expense),
            limit: Some(500),
            start_date: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        let raw = serde_json::to_value(&query).unwrap();
        assert_eq!(raw["type"], "expense");
        assert_eq!(raw["limit"], 500);
        assert_eq!(raw["startDate"], "2024-01-01T00:00:00Z");
        assert!(raw.get("page").is_none());
    }
}
