//! Realized profit/loss events.

use chrono::{Datelike, NaiveDate};

/// Minimum holding period, in days, for long-term capital gains treatment.
pub const LONG_TERM_HOLD_DAYS: i64 = 365;

/// One realized gain or loss. Positive `amount` is a gain or collected
/// credit, negative a loss. Created once by the matcher and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitEvent {
    pub date: NaiveDate,
    pub amount: f64,
    pub is_long_term: bool,
    pub ticker: String,
    pub tag: String,
}

impl ProfitEvent {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Holding-period classification for a lot sold on `sold_at`.
///
/// Calendar-day arithmetic, not wall-clock duration: a span of exactly 365
/// days qualifies, and leap days count like any other day.
pub fn is_long_term(acquired_at: NaiveDate, sold_at: NaiveDate) -> bool {
    (sold_at - acquired_at).num_days() >= LONG_TERM_HOLD_DAYS
}
