mod branch_report;
mod period;

pub use branch_report::{round_amount, BonusDetail, BonusReport, BonusSummary, BranchReport};
pub use period::Period;
