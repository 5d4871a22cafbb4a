pub mod bonus_calculator;
pub mod normalizer;

pub use bonus_calculator::{bonus_rate, compute_bonus_report, summarize};
