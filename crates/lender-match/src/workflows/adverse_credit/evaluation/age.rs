use chrono::{DateTime, Utc};

/// Months are counted as fixed 30-day blocks, not calendar months.
pub const DAYS_PER_MONTH: i64 = 30;

const MILLIS_PER_MONTH: i64 = DAYS_PER_MONTH * 24 * 60 * 60 * 1000;

/// Whole 30-day months elapsed between the instant `at` and `reference`.
///
/// Rounds towards negative infinity, so an instant in the future yields a
/// negative age.
pub fn age_months(at: DateTime<Utc>, reference: DateTime<Utc>) -> i64 {
    (reference - at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_MONTH)
}

/// Ceilings are inclusive: an amount equal to the ceiling is within policy.
pub fn exceeds_ceiling(amount: f64, ceiling: f64) -> bool {
    amount > ceiling
}

pub fn format_pounds(amount: f64) -> String {
    format!("£{amount}")
}
