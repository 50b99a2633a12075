//! Billing period boundaries
//!
//! The period is the calendar month in UTC, uniformly: `period_used`
//! always covers `[first of this month, now)` and `reset_at` is the
//! first instant of the next month. Deriving both from the same civil
//! date keeps reconciliation and reset consistent for every account.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};

/// Compute `(period_start, reset_at)` for the period containing `now`
pub fn current_period(now: Timestamp) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let first: Date = now.to_zoned(TimeZone::UTC).date().first_of_month();
    let start = first.to_zoned(TimeZone::UTC)?.timestamp();
    let reset_at = first.checked_add(1.month())?.to_zoned(TimeZone::UTC)?.timestamp();
    Ok((start, reset_at))
}
