// src/common/params.rs

/// Parses a `customerId`/`jobId` route parameter into a row id.
///
/// Anything that is not a positive integer is treated as "no such entity",
/// so callers fall back to their not-found path instead of erroring.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
