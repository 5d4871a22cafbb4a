// Property-based tests for payment-ratio proration.
//
// The key invariant: splitting one payment into installments never changes
// the bonus an invoice ultimately earns, up to presentation rounding.

use proptest::prelude::*;
use qoyod_bonus::bonus::services::compute_bonus_report;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

/// Build an invoice from line totals expressed in cents.
fn invoice_from_cents(total_cents: u64, line_cents: &[u64]) -> Value {
    let lines: Vec<Value> = line_cents
        .iter()
        .map(|&cents| json!({ "total": Decimal::new(cents as i64, 2) }))
        .collect();
    json!({
        "id": 1,
        "total": Decimal::new(total_cents as i64, 2),
        "branch": "test",
        "lines": lines,
    })
}

fn payment(amount_cents: u64) -> Value {
    json!({ "invoice_id": 1, "amount": Decimal::new(amount_cents as i64, 2) })
}

fn branch_bonus(invoices: &[Value], payments: &[Value]) -> Decimal {
    compute_bonus_report(invoices, payments)
        .get("test")
        .map(|b| b.total_bonus)
        .unwrap_or(Decimal::ZERO)
}

proptest! {
    #[test]
    fn test_split_payment_yields_same_bonus_as_full_payment(
        total_cents in 1u64..1_000_000u64,
        line_cents in prop::collection::vec(1u64..20_000u64, 1..5),
        amount_cents in 1u64..2_000_000u64,
    ) {
        let invoices = vec![invoice_from_cents(total_cents, &line_cents)];

        let half = amount_cents / 2;
        let single = vec![payment(amount_cents)];
        let split = vec![payment(half), payment(amount_cents - half)];

        let single_bonus = branch_bonus(&invoices, &single);
        let split_bonus = branch_bonus(&invoices, &split);

        let drift = (single_bonus - split_bonus).abs();
        prop_assert!(
            drift <= dec!(0.01),
            "split bonus {} vs single bonus {} drifts by {}",
            split_bonus, single_bonus, drift
        );
    }

    #[test]
    fn test_zero_total_invoice_never_earns_bonus(
        line_cents in prop::collection::vec(1u64..20_000u64, 1..5),
        amount_cents in 1u64..2_000_000u64,
    ) {
        let invoices = vec![invoice_from_cents(0, &line_cents)];
        let payments = vec![payment(amount_cents)];

        // Zero invoice total forces the ratio to zero instead of dividing
        prop_assert_eq!(branch_bonus(&invoices, &payments), Decimal::ZERO);
    }

    #[test]
    fn test_payment_order_does_not_change_totals(
        total_cents in 1u64..1_000_000u64,
        line_cents in prop::collection::vec(1u64..20_000u64, 1..4),
        amounts in prop::collection::vec(1u64..500_000u64, 1..5),
    ) {
        let invoices = vec![invoice_from_cents(total_cents, &line_cents)];
        let forward: Vec<Value> = amounts.iter().map(|&a| payment(a)).collect();
        let reversed: Vec<Value> = amounts.iter().rev().map(|&a| payment(a)).collect();

        let a = compute_bonus_report(&invoices, &forward);
        let b = compute_bonus_report(&invoices, &reversed);

        let branch_a = a.get("test").unwrap();
        let branch_b = b.get("test").unwrap();
        prop_assert_eq!(branch_a.total_bonus, branch_b.total_bonus);
        prop_assert_eq!(branch_a.total_sales, branch_b.total_sales);
        prop_assert_eq!(branch_a.invoice_count, branch_b.invoice_count);
        prop_assert_eq!(branch_a.payment_count, branch_b.payment_count);
    }
}
