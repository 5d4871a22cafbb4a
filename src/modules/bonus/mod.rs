// Bonus reporting module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{BonusReport, BonusSummary, BranchReport, Period};
pub use services::{compute_bonus_report, summarize};
