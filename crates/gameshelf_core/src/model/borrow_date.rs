//! Canonical `dd/mm/yyyy` borrow-date format.
//!
//! # Responsibility
//! - Parse borrow dates typed into the edit form.
//! - Render borrow dates for the form pre-fill and the list rows.
//!
//! # Invariants
//! - Parsing and formatting use the same pattern, so a formatted date always
//!   parses back to the same day.
//! - Input is `d/m/yyyy` with ASCII digits; day and month may omit the
//!   leading zero. Output is always zero-padded `dd/mm/yyyy`.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `chrono` pattern for the shared `dd/mm/yyyy` format.
pub const BORROW_DATE_PATTERN: &str = "%d/%m/%Y";

static BORROW_DATE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").expect("valid borrow date regex")
});

/// Borrow-date text that cannot be turned into a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowDateError {
    /// Text does not have the `dd/mm/yyyy` shape.
    Malformed(String),
    /// Shape is right but the day does not exist (e.g. `32/13/2024`).
    OutOfRange(String),
}

impl Display for BorrowDateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "borrow date `{value}` does not match dd/mm/yyyy")
            }
            Self::OutOfRange(value) => write!(f, "borrow date `{value}` is not a calendar day"),
        }
    }
}

impl BorrowDateError {
    /// Stable reason code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::OutOfRange(_) => "out_of_range",
        }
    }
}

impl Error for BorrowDateError {}

/// Parses one borrow date in `dd/mm/yyyy` form.
///
/// Surrounding whitespace is ignored and `1/5/2024` reads as `01/05/2024`.
pub fn parse_borrow_date(text: &str) -> Result<NaiveDate, BorrowDateError> {
    let trimmed = text.trim();
    if !BORROW_DATE_SHAPE_RE.is_match(trimmed) {
        return Err(BorrowDateError::Malformed(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, BORROW_DATE_PATTERN)
        .map_err(|_| BorrowDateError::OutOfRange(trimmed.to_string()))
}

/// Formats one borrow date as `dd/mm/yyyy`.
pub fn format_borrow_date(date: NaiveDate) -> String {
    date.format(BORROW_DATE_PATTERN).to_string()
}

/// Today's local date in `dd/mm/yyyy`, used to pre-fill the form.
pub fn today_borrow_date_text() -> String {
    format_borrow_date(Local::now().date_naive())
}
