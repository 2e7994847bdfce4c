/// Largest number of dates a single `start:end` token may resolve to.
/// Ten years of days; wider ranges are rejected per token.
pub const MAX_RANGE_DAYS: i64 = 3_660;
