//! Field-name normalization for raw Qoyod records.
//!
//! The upstream schema is not stable: depending on the API version and the
//! account's environment, the same attribute shows up under different keys
//! (`total` vs `grand_total`, `lines` vs `line_items`, ...). Each canonical
//! attribute is therefore resolved through an ordered fallback chain where
//! the first present, non-null candidate wins. Every resolver is total: a
//! record that matches nothing yields the documented default instead of an
//! error, so one malformed record can never abort a whole report.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Grouping key used when an invoice carries no branch/inventory information.
pub const UNSPECIFIED: &str = "غير محدد";

/// One step in a fallback chain: pulls a candidate value out of a raw record.
pub type Accessor = fn(&Value) -> Option<&Value>;

const INVOICE_TOTAL: &[Accessor] = &[|v| v.get("total"), |v| v.get("grand_total")];

const BRANCH_KEY: &[Accessor] = &[
    |v| v.get("inventory_name"),
    |v| v.get("inventory").and_then(|inv| inv.get("name")),
    |v| v.get("branch"),
    |v| v.get("location"),
];

const INVOICE_LINES: &[Accessor] = &[|v| v.get("lines"), |v| v.get("line_items")];

const LINE_TOTAL: &[Accessor] = &[
    |v| v.get("total"),
    |v| v.get("amount"),
    |v| v.get("line_total"),
    |v| v.get("subtotal"),
];

const LINE_PRODUCT_NAME: &[Accessor] = &[
    |v| v.get("product_name"),
    |v| v.get("name"),
    |v| v.get("item_name"),
    |v| v.get("description"),
];

const INVOICE_NUMBER: &[Accessor] = &[
    |v| v.get("reference"),
    |v| v.get("number"),
    |v| v.get("invoice_number"),
    |v| v.get("id"),
];

const INVOICE_DATE: &[Accessor] = &[|v| v.get("date"), |v| v.get("invoice_date")];

const PAYMENT_DATE: &[Accessor] = &[
    |v| v.get("date"),
    |v| v.get("payment_date"),
    |v| v.get("created_at"),
];

const PAYMENT_AMOUNT: &[Accessor] = &[|v| v.get("amount")];

/// Walk a fallback chain and return the first present, non-null candidate.
pub fn resolve<'v>(record: &'v Value, chain: &[Accessor]) -> Option<&'v Value> {
    chain
        .iter()
        .filter_map(|accessor| accessor(record))
        .find(|candidate| !candidate.is_null())
}

/// Coerce a JSON value into a decimal amount. Accepts numbers and numeric
/// strings (both occur in the wild); anything else is treated as absent.
fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Coerce a JSON value into display text. Numbers are stringified so that
/// numeric invoice ids can serve as display numbers.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn resolve_decimal(record: &Value, chain: &[Accessor]) -> Decimal {
    resolve(record, chain)
        .and_then(as_decimal)
        .unwrap_or(Decimal::ZERO)
}

/// Invoice grand total, defaulting to zero.
pub fn invoice_total(invoice: &Value) -> Decimal {
    resolve_decimal(invoice, INVOICE_TOTAL)
}

/// Branch/inventory grouping key, falling back to the unspecified sentinel.
pub fn branch_key(invoice: &Value) -> String {
    resolve(invoice, BRANCH_KEY)
        .and_then(as_text)
        .unwrap_or_else(|| UNSPECIFIED.to_string())
}

/// Invoice line items; an invoice without any recognizable line array is
/// treated as having no lines.
pub fn invoice_lines(invoice: &Value) -> &[Value] {
    resolve(invoice, INVOICE_LINES)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Monetary total of a single line item, defaulting to zero.
pub fn line_total(line: &Value) -> Decimal {
    resolve_decimal(line, LINE_TOTAL)
}

/// Product name of a single line item.
pub fn line_product_name(line: &Value) -> String {
    resolve(line, LINE_PRODUCT_NAME)
        .and_then(as_text)
        .unwrap_or_else(|| UNSPECIFIED.to_string())
}

/// Human-facing invoice number, falling back to the raw id.
pub fn invoice_number(invoice: &Value) -> String {
    resolve(invoice, INVOICE_NUMBER)
        .and_then(as_text)
        .unwrap_or_default()
}

/// Invoice issue date, when present.
pub fn invoice_date(invoice: &Value) -> Option<String> {
    resolve(invoice, INVOICE_DATE).and_then(as_text)
}

/// Payment settlement date, when present.
pub fn payment_date(payment: &Value) -> Option<String> {
    resolve(payment, PAYMENT_DATE).and_then(as_text)
}

/// Amount settled by a single payment, defaulting to zero.
pub fn payment_amount(payment: &Value) -> Decimal {
    resolve_decimal(payment, PAYMENT_AMOUNT)
}

/// Join key of a record: its `id`, normalized to a string so that numeric
/// and string ids from different API versions compare equal.
pub fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(as_text)
}

/// Invoice referenced by a payment, normalized like [`record_id`].
pub fn payment_invoice_id(payment: &Value) -> Option<String> {
    payment.get("invoice_id").and_then(as_text)
}

/// Inventory identifier carried by an invoice, when present.
pub fn inventory_id(invoice: &Value) -> Option<String> {
    invoice.get("inventory_id").and_then(as_text)
}
