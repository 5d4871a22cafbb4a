use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Per-branch bonus report map. Insertion order follows the order in which
/// branches were first observed in the payment stream, and is part of the
/// response contract.
pub type BonusReport = IndexMap<String, BranchReport>;

/// Round a monetary amount to 2 decimal places for presentation.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Mutable per-branch accumulator, finalized once all payments are processed.
///
/// Field names serialize in camelCase to preserve the report shape existing
/// consumers of the API depend on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchReport {
    /// Sales volume attributed to this branch, prorated by payment ratio
    pub total_sales: Decimal,
    /// Bonus earned by this branch across all processed payments
    pub total_bonus: Decimal,
    /// Number of (invoice, payment) pairings with at least one line item.
    /// An invoice settled in two installments counts twice.
    pub invoice_count: i64,
    /// Number of payments attributed to this branch, matched or not by lines
    pub payment_count: i64,
    /// Mean bonus per counted pairing, zero when nothing was counted
    pub average_bonus: Decimal,
    /// Upstream inventory identifier, taken from the first invoice seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<String>,
    /// Audit trail: one record per processed (line item, payment) pair
    pub details: Vec<BonusDetail>,
}

impl BranchReport {
    pub fn new(inventory_id: Option<String>) -> Self {
        Self {
            total_sales: Decimal::ZERO,
            total_bonus: Decimal::ZERO,
            invoice_count: 0,
            payment_count: 0,
            average_bonus: Decimal::ZERO,
            inventory_id,
            details: Vec::new(),
        }
    }

    /// Round accumulated totals and derive the average. Accumulation runs on
    /// unrounded values; only this finalization step rounds.
    pub fn finalize(&mut self) {
        self.total_sales = round_amount(self.total_sales);
        self.total_bonus = round_amount(self.total_bonus);
        self.average_bonus = if self.invoice_count > 0 {
            round_amount(self.total_bonus / Decimal::from(self.invoice_count))
        } else {
            Decimal::ZERO
        };
    }
}

/// Audit-trail record for one (invoice line, payment) pair. Immutable once
/// appended; all monetary fields are presentation-rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusDetail {
    /// Display number of the invoice (reference, falling back to id)
    pub invoice_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    pub payment_amount: Decimal,
    pub product: String,
    pub line_total: Decimal,
    /// Applied bonus tier as a percentage (1 or 2)
    pub bonus_percent: Decimal,
    /// Fraction of the invoice settled by this payment, as a percentage
    pub payment_ratio: Decimal,
    /// Bonus earned by this line for this payment
    pub bonus: Decimal,
}

/// Whole-report summary, derived by folding over the branch map. Never
/// stored; recomputable from the report at any time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusSummary {
    pub total_branches: usize,
    pub total_sales: Decimal,
    pub total_bonus: Decimal,
    pub total_invoices: i64,
    pub total_payments: i64,
    pub average_bonus_per_invoice: Decimal,
    /// Branch keys in the order they were first observed
    pub branches: Vec<String>,
}
