use api_types::transaction::{TransactionKind, TransactionRecord};
use chrono::TimeZone;
use engine::{AnalysisWindow, CategoryTotal, ResolvedWindow, TimeBucket, Totals, summarize};
use rust_decimal::Decimal;
use serde_json::json;

fn record(
    kind: TransactionKind,
    amount: &str,
    category: Option<&str>,
    date: &str,
) -> TransactionRecord {
    TransactionRecord {
        id: None,
        kind,
        amount: amount.parse().unwrap(),
        category: category.map(str::to_string),
        date: Some(date.to_string()),
        description: None,
    }
}

fn resolved(window: AnalysisWindow, year: i32, month: u32, day: u32) -> ResolvedWindow {
    let now = chrono_tz::UTC
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .unwrap();
    window.resolve(now)
}

fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

#[test]
fn all_time_dashboard_scenario() {
    let records = vec![
        record(TransactionKind::Income, "100", Some("Salary"), "2024-01-05"),
        record(TransactionKind::Expense, "40", Some("Food"), "2024-01-10"),
        record(TransactionKind::Expense, "20", Some("Food"), "2024-02-03"),
    ];
    let summary = summarize(&records, &resolved(AnalysisWindow::AllTime, 2024, 3, 15));

    assert_eq!(
        summary.totals,
        Totals {
            income: dec("100"),
            expense: dec("60"),
            savings: dec("40"),
        }
    );
    assert_eq!(
        summary.categories,
        vec![CategoryTotal {
            category: "Food".to_string(),
            amount: dec("60"),
        }]
    );
    assert_eq!(
        summary.buckets,
        vec![
            TimeBucket {
                key: "2024-01".to_string(),
                label: "Jan 2024".to_string(),
                income: dec("100"),
                expense: dec("40"),
            },
            TimeBucket {
                key: "2024-02".to_string(),
                label: "Feb 2024".to_string(),
                income: dec("0"),
                expense: dec("20"),
            },
        ]
    );
}

#[test]
fn records_straight_off_the_wire_aggregate_the_same() {
    let records: Vec<TransactionRecord> = serde_json::from_value(json!([
        {"id": "t1", "type": "income", "amount": 100.5, "category": "Salary", "date": "2024-01-05T10:00:00Z"},
        {"id": "t2", "type": "expense", "amount": 40.25, "category": "Food", "date": "2024-01-10"},
        {"id": "t3", "type": "transfer", "amount": 999, "category": "Misc", "date": "2024-01-11"},
        {"id": "t4", "type": "expense", "amount": 5, "category": "Food", "date": "not a date"}
    ]))
    .unwrap();
    let summary = summarize(&records, &resolved(AnalysisWindow::AllTime, 2024, 3, 15));

    // The transfer and the unparseable date contribute nowhere.
    assert_eq!(summary.totals.income, dec("100.5"));
    assert_eq!(summary.totals.expense, dec("40.25"));
    assert_eq!(summary.totals.savings, dec("60.25"));
    assert_eq!(summary.categories.len(), 1);
    assert_eq!(summary.buckets.len(), 1);
}

#[test]
fn bucket_sums_always_match_totals() {
    let records = vec![
        record(TransactionKind::Income, "10", None, "2024-01-02"),
        record(TransactionKind::Expense, "3.33", Some("Food"), "2024-02-02"),
        record(TransactionKind::Expense, "6.67", None, "2024-03-02"),
        record(TransactionKind::Other, "50", Some("Transfer"), "2024-01-02"),
        record(TransactionKind::Income, "7", Some("Gift"), "garbage"),
    ];
    let summary = summarize(&records, &resolved(AnalysisWindow::AllTime, 2024, 3, 15));

    let bucket_income: Decimal = summary.buckets.iter().map(|bucket| bucket.income).sum();
    let bucket_expense: Decimal = summary.buckets.iter().map(|bucket| bucket.expense).sum();
    assert_eq!(bucket_income, summary.totals.income);
    assert_eq!(bucket_expense, summary.totals.expense);
}

#[test]
fn buckets_stay_chronological_with_shuffled_input() {
    let records = vec![
        record(TransactionKind::Expense, "1", Some("A"), "2024-03-01"),
        record(TransactionKind::Expense, "1", Some("A"), "2023-11-20"),
        record(TransactionKind::Expense, "1", Some("A"), "2024-01-15"),
        record(TransactionKind::Expense, "1", Some("A"), "2023-11-02"),
    ];
    let summary = summarize(&records, &resolved(AnalysisWindow::AllTime, 2024, 3, 15));

    let keys: Vec<&str> = summary.buckets.iter().map(|bucket| bucket.key.as_str()).collect();
    assert_eq!(keys, vec!["2023-11", "2024-01", "2024-03"]);
    assert_eq!(summary.buckets[0].expense, dec("2"));
}

#[test]
fn bounded_windows_bucket_by_day() {
    let records = vec![
        record(TransactionKind::Expense, "12", Some("Food"), "2024-03-05"),
        record(TransactionKind::Income, "30", Some("Salary"), "2024-03-14"),
    ];
    let summary = summarize(&records, &resolved(AnalysisWindow::ThisMonth, 2024, 3, 15));

    assert_eq!(summary.buckets[0].key, "2024-03-05");
    assert_eq!(summary.buckets[0].label, "Mar 5");
    assert_eq!(summary.buckets[1].key, "2024-03-14");
    assert_eq!(summary.buckets[1].label, "Mar 14");
}

#[test]
fn instants_bucket_on_the_local_day() {
    // Late evening UTC is already the next day in Kolkata.
    let records = vec![record(
        TransactionKind::Expense,
        "8",
        Some("Food"),
        "2024-03-10T22:00:00Z",
    )];
    let now = chrono_tz::Asia::Kolkata
        .with_ymd_and_hms(2024, 3, 15, 9, 0, 0)
        .unwrap();
    let summary = summarize(&records, &AnalysisWindow::ThisMonth.resolve(now));

    assert_eq!(summary.buckets[0].key, "2024-03-11");
}

#[test]
fn empty_input_is_all_zero() {
    let summary = summarize(&[], &resolved(AnalysisWindow::ThisWeek, 2024, 3, 15));

    assert_eq!(summary.totals, Totals::ZERO);
    assert!(summary.categories.is_empty());
    assert!(summary.buckets.is_empty());
}

#[test]
fn categoryless_expenses_count_toward_totals_but_not_the_rollup() {
    let records = vec![
        record(TransactionKind::Expense, "25", None, "2024-03-05"),
        record(TransactionKind::Expense, "10", Some("Food"), "2024-03-06"),
    ];
    let summary = summarize(&records, &resolved(AnalysisWindow::ThisMonth, 2024, 3, 15));

    assert_eq!(summary.totals.expense, dec("35"));
    assert_eq!(
        summary.categories,
        vec![CategoryTotal {
            category: "Food".to_string(),
            amount: dec("10"),
        }]
    );
}

#[test]
fn rollup_is_alphabetical_by_category() {
    let records = vec![
        record(TransactionKind::Expense, "5", Some("Transport"), "2024-03-02"),
        record(TransactionKind::Expense, "9", Some("Food"), "2024-03-03"),
        record(TransactionKind::Expense, "2", Some("Food"), "2024-03-04"),
    ];
    let summary = summarize(&records, &resolved(AnalysisWindow::ThisMonth, 2024, 3, 15));

    let names: Vec<&str> = summary
        .categories
        .iter()
        .map(|total| total.category.as_str())
        .collect();
    assert_eq!(names, vec!["Food", "Transport"]);
}

#[test]
fn standalone_totals_match_the_summary() {
    let records = vec![
        record(TransactionKind::Income, "100", None, "2024-01-05"),
        record(TransactionKind::Expense, "60", Some("Food"), "2024-01-10"),
        record(TransactionKind::Expense, "1", Some("Food"), "bad date"),
    ];
    let window = resolved(AnalysisWindow::AllTime, 2024, 3, 15);

    assert_eq!(
        Totals::of(&records, chrono_tz::UTC),
        summarize(&records, &window).totals
    );
}
