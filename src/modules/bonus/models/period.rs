use chrono::{Days, Months, NaiveDate};

use crate::core::{AppError, Result};

const MONTH_NAMES: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// A validated reporting period (one calendar month).
#[derive(Debug, Clone, Copy)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Validate a year/month pair coming from the request layer.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(2000..=2100).contains(&year) {
            return Err(AppError::validation(
                "year must be between 2000 and 2100",
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(AppError::validation("month must be between 1 and 12"));
        }

        Ok(Self { year, month })
    }

    /// First day of the month (inclusive window boundary).
    pub fn start_date(&self) -> NaiveDate {
        // Validated on construction, so the date always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive window boundary).
    pub fn end_date(&self) -> NaiveDate {
        self.start_date() + Months::new(1) - Days::new(1)
    }

    /// First day of the month `n` months earlier. Used to widen the invoice
    /// fetch window so installment payments can still find their invoice.
    pub fn start_date_months_back(&self, n: u32) -> NaiveDate {
        self.start_date() - Months::new(n)
    }

    /// Arabic month name, matching the report format consumers expect.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}
