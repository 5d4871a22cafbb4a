//! Bonus aggregation over normalized invoice and payment collections.
//!
//! Pure and synchronous: both entry points take in-memory collections that
//! the Qoyod client already fetched (and, when requested, pre-filtered by
//! inventory), and neither performs I/O nor fails. Data-consistency gaps
//! such as payments pointing at unknown invoices are expected in partially
//! synced accounting data and are skipped rather than reported.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::modules::bonus::models::{round_amount, BonusDetail, BonusReport, BonusSummary, BranchReport};
use crate::modules::bonus::services::normalizer;

/// Line items at or above this value earn the higher bonus tier.
fn high_value_threshold() -> Decimal {
    Decimal::from(70)
}

/// Two-tier incentive: 2% on high-value lines, 1% otherwise.
pub fn bonus_rate(line_total: Decimal) -> Decimal {
    if line_total >= high_value_threshold() {
        Decimal::new(2, 2) // 0.02
    } else {
        Decimal::new(1, 2) // 0.01
    }
}

/// Join payments to invoices and accumulate per-branch bonus totals.
///
/// Each payment settles some fraction of its invoice (`amount / total`), and
/// every line's bonus contribution is prorated by that fraction, so an
/// invoice paid in installments has its bonus split across them and sums to
/// the full bonus once fully paid. The ratio is deliberately unclamped: an
/// overpayment yields a ratio above 1 and a proportionally larger bonus.
///
/// Payments that reference no known invoice are skipped. An invoice with no
/// line items still counts the payment but accrues no sales, bonus, or
/// detail records. Branch totals only become meaningful after the final
/// rounding pass; `details` order follows payment input order.
pub fn compute_bonus_report(invoices: &[Value], payments: &[Value]) -> BonusReport {
    let mut report = BonusReport::new();

    for payment in payments {
        let Some(invoice_id) = normalizer::payment_invoice_id(payment) else {
            continue;
        };
        let Some(invoice) = invoices
            .iter()
            .find(|inv| normalizer::record_id(inv).as_deref() == Some(invoice_id.as_str()))
        else {
            debug!(invoice_id = %invoice_id, "payment references unknown invoice, skipping");
            continue;
        };

        let invoice_total = normalizer::invoice_total(invoice);
        let payment_amount = normalizer::payment_amount(payment);
        let payment_ratio = if invoice_total > Decimal::ZERO {
            payment_amount / invoice_total
        } else {
            Decimal::ZERO
        };

        let branch = report
            .entry(normalizer::branch_key(invoice))
            .or_insert_with(|| BranchReport::new(normalizer::inventory_id(invoice)));

        branch.payment_count += 1;

        let lines = normalizer::invoice_lines(invoice);
        if lines.is_empty() {
            continue;
        }

        for line in lines {
            let line_total = normalizer::line_total(line);
            let rate = bonus_rate(line_total);
            let line_bonus = line_total * rate * payment_ratio;

            branch.total_sales += line_total * payment_ratio;
            branch.total_bonus += line_bonus;

            branch.details.push(BonusDetail {
                invoice_number: normalizer::invoice_number(invoice),
                invoice_date: normalizer::invoice_date(invoice),
                payment_date: normalizer::payment_date(payment),
                payment_amount: round_amount(payment_amount),
                product: normalizer::line_product_name(line),
                line_total: round_amount(line_total),
                bonus_percent: rate * Decimal::ONE_HUNDRED,
                payment_ratio: round_amount(payment_ratio * Decimal::ONE_HUNDRED),
                bonus: round_amount(line_bonus),
            });
        }

        // Counts (invoice, payment) pairings with lines, so an invoice paid
        // in two installments increments this twice.
        branch.invoice_count += 1;
    }

    for branch in report.values_mut() {
        branch.finalize();
    }

    report
}

/// Fold a branch report into a whole-company summary.
pub fn summarize(report: &BonusReport) -> BonusSummary {
    let total_sales: Decimal = report.values().map(|b| b.total_sales).sum();
    let total_bonus: Decimal = report.values().map(|b| b.total_bonus).sum();
    let total_invoices: i64 = report.values().map(|b| b.invoice_count).sum();
    let total_payments: i64 = report.values().map(|b| b.payment_count).sum();

    BonusSummary {
        total_branches: report.len(),
        total_sales: round_amount(total_sales),
        total_bonus: round_amount(total_bonus),
        total_invoices,
        total_payments,
        average_bonus_per_invoice: if total_invoices > 0 {
            round_amount(total_bonus / Decimal::from(total_invoices))
        } else {
            Decimal::ZERO
        },
        branches: report.keys().cloned().collect(),
    }
}
