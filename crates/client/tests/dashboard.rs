use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{Datelike, Utc};
use client::{ApiClient, ClientConfig, CredentialPair, MemoryStore};
use engine::AnalysisWindow;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tokio::net::TcpListener;

struct DashBackend {
    tx_hits: AtomicUsize,
    last_params: Mutex<Option<HashMap<String, String>>>,
    /// Transactions served for the analyzed window.
    current: Value,
    /// Transactions served for the window right before it.
    previous: Value,
    fail_previous: bool,
    budget: Value,
    profile: Value,
}

impl DashBackend {
    fn new(current: Value, previous: Value, budget: Value, profile: Value) -> Self {
        Self {
            tx_hits: AtomicUsize::new(0),
            last_params: Mutex::new(None),
            current,
            previous,
            fail_previous: false,
            budget,
            profile,
        }
    }
}

fn ok_envelope(data: Value) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "",
        "data": data,
        "timestamp": "2024-03-15T12:00:00Z",
    }))
}

async fn transactions(
    State(state): State<Arc<DashBackend>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.tx_hits.fetch_add(1, Ordering::SeqCst);
    // A previous-window probe starts in an earlier month than today.
    let is_previous = params
        .get("startDate")
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .is_some_and(|start| {
            let now = Utc::now();
            (start.year(), start.month()) != (now.year(), now.month())
        });
    *state.last_params.lock().unwrap() = Some(params);

    if is_previous {
        if state.fail_previous {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "message": "window service down"})),
            );
        }
        return (StatusCode::OK, ok_envelope(state.previous.clone()));
    }
    (StatusCode::OK, ok_envelope(state.current.clone()))
}

async fn budget(State(state): State<Arc<DashBackend>>) -> Json<Value> {
    ok_envelope(state.budget.clone())
}

async fn profile(State(state): State<Arc<DashBackend>>) -> Json<Value> {
    ok_envelope(state.profile.clone())
}

async fn start_backend(state: Arc<DashBackend>) -> SocketAddr {
    let router = Router::new()
        .route("/api/transactions", get(transactions))
        .route("/api/user/budget", get(budget))
        .route("/api/user/profile", get(profile))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            eprintln!("mock server failed: {err}");
        }
    });
    addr
}

fn client_for(backend: SocketAddr) -> (ApiClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_credentials(CredentialPair {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
    }));
    let config = ClientConfig {
        base_url: format!("http://{backend}"),
        // No provider involved; refresh never triggers in these tests.
        token_url: "http://127.0.0.1:9/v1/token".to_string(),
        api_key: Some("test-key".to_string()),
        ..ClientConfig::default()
    };
    (ApiClient::new(&config, store.clone()).unwrap(), store)
}

fn tx(kind: &str, amount: i64, category: &str, date: &str) -> Value {
    json!({"type": kind, "amount": amount, "category": category, "date": date})
}

fn budget_payload(monthly: f64, remaining: f64) -> Value {
    json!({
        "period": {"month": 3, "year": 2024, "daysRemaining": 16},
        "budget": {
            "monthly": monthly,
            "spent": 60,
            "remaining": remaining,
            "percentageUsed": 3,
            "dailyBudget": 64.5,
            "status": "on_track",
        },
        "categoryBreakdown": [],
    })
}

fn profile_payload(currency: &str, monthly_budget: i64) -> Value {
    json!({
        "uid": "u1",
        "email": "ada@example.com",
        "name": "Ada",
        "currency": currency,
        "monthlyBudget": monthly_budget,
        "savingsGoal": 100,
    })
}

#[tokio::test]
async fn all_time_load_joins_summary_budget_and_profile() {
    let state = Arc::new(DashBackend::new(
        json!({"transactions": [
            tx("income", 100, "Salary", "2024-01-05"),
            tx("expense", 40, "Food", "2024-01-10"),
            tx("expense", 20, "Food", "2024-02-03"),
        ]}),
        json!({"transactions": []}),
        budget_payload(2000.0, 150.5),
        profile_payload("USD", 500),
    ));
    let addr = start_backend(state.clone()).await;
    let (api, _store) = client_for(addr);

    let data = api.load_dashboard(AnalysisWindow::AllTime).await.unwrap();

    assert_eq!(data.summary.totals.income, Decimal::new(100, 0));
    assert_eq!(data.summary.totals.expense, Decimal::new(60, 0));
    assert_eq!(data.summary.totals.savings, Decimal::new(40, 0));
    let keys: Vec<&str> = data
        .summary
        .buckets
        .iter()
        .map(|bucket| bucket.key.as_str())
        .collect();
    assert_eq!(keys, vec!["2024-01", "2024-02"]);

    // No previous window exists, so the deltas are the raw figures.
    assert_eq!(data.trends.income.value, "$100.00");
    assert!(data.trends.income.is_positive);
    assert_eq!(data.trends.expense.value, "-$60.00");
    assert!(!data.trends.expense.is_positive);
    assert_eq!(data.trends.savings.value, "$40.00");
    assert_eq!(data.trends.budget.value, "$150.50");
    assert!(data.trends.budget.is_positive);

    assert_eq!(data.monthly_budget, Decimal::new(2000, 0));
    assert_eq!(data.currency, "USD");

    // All-time fetches once and without date bounds.
    assert_eq!(state.tx_hits.load(Ordering::SeqCst), 1);
    let params = state.last_params.lock().unwrap().clone().unwrap();
    assert_eq!(params.get("limit").map(String::as_str), Some("500"));
    assert!(!params.contains_key("startDate"));
    assert!(!params.contains_key("endDate"));
}

#[tokio::test]
async fn this_month_trends_compare_with_the_previous_window() {
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let state = Arc::new(DashBackend::new(
        json!({"transactions": [
            tx("income", 120, "Salary", &today),
            tx("expense", 60, "Food", &today),
        ]}),
        // Only the totals of the previous window matter.
        json!({"transactions": [
            tx("income", 50, "Salary", "2020-01-10"),
            tx("expense", 80, "Food", "2020-01-12"),
        ]}),
        budget_payload(2000.0, 150.5),
        profile_payload("USD", 500),
    ));
    let addr = start_backend(state.clone()).await;
    let (api, _store) = client_for(addr);

    let data = api.load_dashboard(AnalysisWindow::ThisMonth).await.unwrap();

    assert_eq!(data.summary.totals.income, Decimal::new(120, 0));
    assert_eq!(data.trends.income.value, "$70.00");
    assert!(data.trends.income.is_positive);
    // Spending dropped from 80 to 60, a favorable move of 20.
    assert_eq!(data.trends.expense.value, "$20.00");
    assert!(data.trends.expense.is_positive);
    // (120 - 60) - (50 - 80) = 90.
    assert_eq!(data.trends.savings.value, "$90.00");
    assert_eq!(state.tx_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn previous_window_failure_degrades_to_a_zero_baseline() {
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let mut backend = DashBackend::new(
        json!({"transactions": [
            tx("income", 120, "Salary", &today),
            tx("expense", 60, "Food", &today),
        ]}),
        json!({"transactions": []}),
        budget_payload(0.0, -25.5),
        profile_payload("USD", 500),
    );
    backend.fail_previous = true;
    let state = Arc::new(backend);
    let addr = start_backend(state.clone()).await;
    let (api, _store) = client_for(addr);

    let data = api.load_dashboard(AnalysisWindow::ThisMonth).await.unwrap();

    // The load itself succeeds; the baseline is just zero.
    assert_eq!(data.trends.income.value, "$120.00");
    assert_eq!(data.trends.expense.value, "-$60.00");
    assert!(!data.trends.expense.is_positive);
    assert_eq!(data.trends.budget.value, "-$25.50");
    assert!(!data.trends.budget.is_positive);
    // Budget endpoint reported no monthly figure, so the profile's is used.
    assert_eq!(data.monthly_budget, Decimal::new(500, 0));
    assert_eq!(state.tx_hits.load(Ordering::SeqCst), 2);
}
