// Bonus aggregation scenarios: payment/invoice joining, proration by
// payment ratio, branch grouping, and the tolerated data-consistency gaps.

use qoyod_bonus::bonus::services::{compute_bonus_report, summarize};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn two_line_invoice() -> Value {
    json!({
        "id": 1,
        "reference": "INV-001",
        "total": 100,
        "date": "2026-02-01",
        "inventory_name": "الرياض",
        "inventory_id": 5,
        "lines": [
            { "total": 80, "product_name": "جهاز" },
            { "total": 20, "product_name": "كيبل" }
        ]
    })
}

#[test]
fn test_full_payment_earns_full_bonus() {
    let invoices = vec![two_line_invoice()];
    let payments = vec![json!({ "invoice_id": 1, "amount": 100, "date": "2026-02-10" })];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("الرياض").expect("branch must exist");

    // 80 >= 70 earns 2%, 20 earns 1%
    assert_eq!(branch.total_bonus, dec!(1.80));
    assert_eq!(branch.total_sales, dec!(100.00));
    assert_eq!(branch.invoice_count, 1);
    assert_eq!(branch.payment_count, 1);
    assert_eq!(branch.average_bonus, dec!(1.80));
    assert_eq!(branch.inventory_id.as_deref(), Some("5"));

    assert_eq!(branch.details.len(), 2);
    let first = &branch.details[0];
    assert_eq!(first.invoice_number, "INV-001");
    assert_eq!(first.product, "جهاز");
    assert_eq!(first.line_total, dec!(80.00));
    assert_eq!(first.bonus_percent, dec!(2));
    assert_eq!(first.payment_ratio, dec!(100.00));
    assert_eq!(first.bonus, dec!(1.60));
    assert_eq!(branch.details[1].bonus, dec!(0.20));
}

#[test]
fn test_half_payment_prorates_bonus() {
    let invoices = vec![two_line_invoice()];
    let payments = vec![json!({ "invoice_id": 1, "amount": 50 })];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("الرياض").unwrap();

    assert_eq!(branch.total_bonus, dec!(0.90));
    assert_eq!(branch.total_sales, dec!(50.00));
    assert_eq!(branch.details[0].payment_ratio, dec!(50.00));
}

#[test]
fn test_overpayment_ratio_propagates_unclamped() {
    let invoices = vec![two_line_invoice()];
    let payments = vec![json!({ "invoice_id": 1, "amount": 200 })];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("الرياض").unwrap();

    assert_eq!(branch.total_bonus, dec!(3.60));
    assert_eq!(branch.total_sales, dec!(200.00));
    assert_eq!(branch.details[0].payment_ratio, dec!(200.00));
}

#[test]
fn test_zero_total_invoice_forces_zero_ratio() {
    let invoices = vec![json!({
        "id": 1,
        "total": 0,
        "branch": "جدة",
        "lines": [{ "total": 80 }]
    })];
    let payments = vec![json!({ "invoice_id": 1, "amount": 50 })];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("جدة").unwrap();

    // No division error; a zero-bonus record is produced instead
    assert_eq!(branch.total_bonus, Decimal::ZERO);
    assert_eq!(branch.total_sales, Decimal::ZERO);
    assert_eq!(branch.invoice_count, 1);
    assert_eq!(branch.details.len(), 1);
    assert_eq!(branch.details[0].bonus, Decimal::ZERO);
}

#[test]
fn test_unmatched_payment_leaves_report_unchanged() {
    let invoices = vec![two_line_invoice()];
    let payments = vec![json!({ "invoice_id": 1, "amount": 100 })];
    let with_orphan = vec![
        json!({ "invoice_id": 1, "amount": 100 }),
        json!({ "invoice_id": 999, "amount": 50 }),
        json!({ "amount": 50 }),
    ];

    let baseline = compute_bonus_report(&invoices, &payments);
    let report = compute_bonus_report(&invoices, &with_orphan);

    assert_eq!(report, baseline);
}

#[test]
fn test_invoice_without_lines_counts_payment_only() {
    let invoices = vec![json!({ "id": 1, "total": 100, "branch": "جدة", "lines": [] })];
    let payments = vec![json!({ "invoice_id": 1, "amount": 100 })];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("جدة").unwrap();

    assert_eq!(branch.payment_count, 1);
    assert_eq!(branch.invoice_count, 0);
    assert_eq!(branch.total_sales, Decimal::ZERO);
    assert_eq!(branch.total_bonus, Decimal::ZERO);
    assert!(branch.details.is_empty());
    assert_eq!(branch.average_bonus, Decimal::ZERO);
}

#[test]
fn test_same_branch_key_shares_one_accumulator() {
    let invoices = vec![
        json!({ "id": 1, "total": 100, "inventory_name": "الرياض", "lines": [{ "total": 100 }] }),
        json!({ "id": 2, "total": 50, "inventory_name": "الرياض", "lines": [{ "total": 50 }] }),
    ];
    let payments = vec![
        json!({ "invoice_id": 1, "amount": 100 }),
        json!({ "invoice_id": 2, "amount": 50 }),
    ];

    let report = compute_bonus_report(&invoices, &payments);
    assert_eq!(report.len(), 1);

    let branch = report.get("الرياض").unwrap();
    assert_eq!(branch.total_sales, dec!(150.00));
    // 100 at 2% + 50 at 1%
    assert_eq!(branch.total_bonus, dec!(2.50));
    assert_eq!(branch.invoice_count, 2);
    assert_eq!(branch.payment_count, 2);
    assert_eq!(branch.details.len(), 2);
}

#[test]
fn test_invoice_paid_twice_counts_two_pairings() {
    let invoices = vec![two_line_invoice()];
    let payments = vec![
        json!({ "invoice_id": 1, "amount": 60 }),
        json!({ "invoice_id": 1, "amount": 40 }),
    ];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("الرياض").unwrap();

    // invoice_count tracks (invoice, payment) pairings, not distinct invoices
    assert_eq!(branch.invoice_count, 2);
    assert_eq!(branch.payment_count, 2);
    assert_eq!(branch.details.len(), 4);
}

#[test]
fn test_branch_order_follows_payment_input_order() {
    let invoices = vec![
        json!({ "id": 1, "total": 10, "branch": "ب", "lines": [{ "total": 10 }] }),
        json!({ "id": 2, "total": 10, "branch": "أ", "lines": [{ "total": 10 }] }),
    ];
    let payments = vec![
        json!({ "invoice_id": 2, "amount": 10 }),
        json!({ "invoice_id": 1, "amount": 10 }),
    ];

    let report = compute_bonus_report(&invoices, &payments);
    let keys: Vec<_> = report.keys().cloned().collect();
    assert_eq!(keys, vec!["أ".to_string(), "ب".to_string()]);
}

#[test]
fn test_missing_branch_groups_under_unspecified_sentinel() {
    let invoices = vec![json!({ "id": 1, "total": 10, "lines": [{ "total": 10 }] })];
    let payments = vec![json!({ "invoice_id": 1, "amount": 10 })];

    let report = compute_bonus_report(&invoices, &payments);
    assert!(report.contains_key("غير محدد"));
}

#[test]
fn test_total_bonus_matches_sum_of_details() {
    let invoices = vec![
        json!({ "id": 1, "total": 99.97, "branch": "أ", "lines": [
            { "total": 40.40 }, { "total": 30.30 }, { "total": 29.27 }
        ] }),
        json!({ "id": 2, "total": 77.77, "branch": "أ", "lines": [{ "total": 77.77 }] }),
    ];
    let payments = vec![
        json!({ "invoice_id": 1, "amount": 50.01 }),
        json!({ "invoice_id": 2, "amount": 33.33 }),
    ];

    let report = compute_bonus_report(&invoices, &payments);
    let branch = report.get("أ").unwrap();

    let detail_sum: Decimal = branch.details.iter().map(|d| d.bonus).sum();
    let drift = (branch.total_bonus - detail_sum).abs();
    assert!(drift <= dec!(0.01), "rounding drift {} exceeds tolerance", drift);
}

#[test]
fn test_summary_reflects_report() {
    let invoices = vec![
        json!({ "id": 1, "total": 100, "branch": "أ", "lines": [{ "total": 100 }] }),
        json!({ "id": 2, "total": 100, "branch": "ب", "lines": [{ "total": 60 }] }),
    ];
    let payments = vec![
        json!({ "invoice_id": 1, "amount": 100 }),
        json!({ "invoice_id": 2, "amount": 100 }),
    ];

    let report = compute_bonus_report(&invoices, &payments);
    let summary = summarize(&report);

    assert_eq!(summary.total_branches, 2);
    assert_eq!(summary.total_sales, dec!(160.00));
    // 100 at 2% + 60 at 1%
    assert_eq!(summary.total_bonus, dec!(2.60));
    assert_eq!(summary.total_invoices, 2);
    assert_eq!(summary.total_payments, 2);
    assert_eq!(summary.average_bonus_per_invoice, dec!(1.30));
    assert_eq!(summary.branches, vec!["أ".to_string(), "ب".to_string()]);
}
