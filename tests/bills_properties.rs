mod common;

use budget_planner::{
    bills::{BillSource, UpcomingBillsAggregator, DEFAULT_HORIZON_DAYS},
    domain::{Frequency, Subscription, Transaction, TransactionKind},
};
use chrono::{DateTime, Duration, Utc};
use common::{clock, now};

fn subscription(name: &str, due: DateTime<Utc>) -> Subscription {
    Subscription::new(name, 20.0, Frequency::Monthly, due, "Entertainment", &clock())
}

fn recurring(category: &str, date: DateTime<Utc>) -> Transaction {
    Transaction::new(date, TransactionKind::Expense, category, 110.0)
        .with_description("recurring bill")
}

#[test]
fn recurring_expense_sorts_before_later_subscription() {
    let aggregator = UpcomingBillsAggregator::new(clock());
    let bills = aggregator.upcoming(
        &[subscription("Streaming", now() + Duration::days(5))],
        &[recurring("Utilities", now() + Duration::days(2))],
        DEFAULT_HORIZON_DAYS,
    );
    let kinds: Vec<_> = bills.iter().map(|bill| bill.source_kind).collect();
    assert_eq!(kinds, vec![BillSource::RecurringExpense, BillSource::Subscription]);
}

#[test]
fn overdue_subscription_included_but_past_recurring_excluded() {
    let aggregator = UpcomingBillsAggregator::new(clock());
    let past = now() - Duration::days(10);
    let bills = aggregator.upcoming(&[subscription("Overdue", past)], &[recurring("Rent", past)], 30);
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].name, "Overdue");
    assert_eq!(bills[0].due_date, past);
}

#[test]
fn horizon_upper_bound_is_inclusive() {
    let aggregator = UpcomingBillsAggregator::new(clock());
    let edge = now() + Duration::days(30);
    let bills = aggregator.upcoming(
        &[
            subscription("AtCutoff", edge),
            subscription("PastCutoff", edge + Duration::milliseconds(1)),
        ],
        &[],
        30,
    );
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].name, "AtCutoff");
}

#[test]
fn explicit_reference_time_overrides_clock() {
    let aggregator = UpcomingBillsAggregator::new(clock());
    let later = now() + Duration::days(60);
    let txns = vec![recurring("Rent", later + Duration::days(1))];
    assert!(aggregator.upcoming(&[], &txns, 30).is_empty());
    assert_eq!(aggregator.upcoming_at(&[], &txns, 30, later).len(), 1);
}

#[test]
fn persisted_json_feeds_the_aggregator() {
    let subs: Vec<Subscription> = serde_json::from_str(
        r#"[{
            "id": "s1", "name": "Cloud Storage", "amount": 2.99, "frequency": "monthly",
            "nextPaymentDate": "2025-06-10", "category": "Other", "dateAdded": "2025-01-01"
        }]"#,
    )
    .expect("subscriptions parse");
    let txns: Vec<Transaction> = serde_json::from_str(
        r#"[
            {"id": "t1", "date": "2025-06-03T00:00:00Z", "type": "expense",
             "category": "Insurance", "description": "Recurring premium", "amount": 95.0},
            {"id": "t2", "date": "2025-06-04", "type": "expense",
             "category": "Groceries", "amount": 54.2}
        ]"#,
    )
    .expect("transactions parse");

    let bills = UpcomingBillsAggregator::new(clock()).upcoming(&subs, &txns, 30);
    let ids: Vec<_> = bills.iter().map(|bill| bill.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "s1"]);
}

#[test]
fn malformed_transaction_date_fails_at_ingestion() {
    let result = serde_json::from_str::<Vec<Transaction>>(
        r#"[{"id": "t1", "date": "31/02/2025", "type": "expense",
             "category": "Rent", "amount": 10.0}]"#,
    );
    assert!(result.is_err());
}
