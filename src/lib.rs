//! Qoyod sales-bonus reporting service.
//!
//! Fetches invoices and payments from the Qoyod accounting API, joins them,
//! and computes a per-branch monthly sales-bonus report. The aggregation
//! core (`modules::bonus::services`) is pure and testable without any
//! network or server harness; everything else is transport glue around it.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::bonus;
pub use modules::qoyod;
