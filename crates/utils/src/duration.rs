pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

#[must_use]
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

#[must_use]
pub fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_PER_HOUR
}

/// Whole minutes used in a folder suffix, with exact halves rounded to even.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn rounded_minutes(minutes: f64) -> i64 {
    minutes.max(0.0).round_ties_even() as i64
}

/// `"90.00 sec | 1.50 min | 0.03 hrs"`
#[must_use]
pub fn format_breakdown(seconds: f64) -> String {
    format!(
        "{seconds:.2} sec | {:.2} min | {:.2} hrs",
        seconds_to_minutes(seconds),
        seconds_to_hours(seconds)
    )
}
