//! Parsing of the hours and rate fields typed by the user.

use super::{ClaimError, ClaimResult};

pub const HOURS_FIELD: &str = "hours worked";
pub const RATE_FIELD: &str = "hourly rate";
pub const TOTAL_FIELD: &str = "total amount";

/// Parse a non-negative, finite amount.
pub fn parse_amount(field: &'static str, text: &str) -> ClaimResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::validation(field, "a value is required"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ClaimError::validation(field, format!("'{trimmed}' is not a number")))?;

    if !value.is_finite() {
        return Err(ClaimError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ClaimError::validation(field, "must be non-negative"));
    }

    // Normalise -0.0 so it is stored and displayed as 0.
    Ok(value + 0.0)
}

pub fn parse_hours(text: &str) -> ClaimResult<f64> {
    parse_amount(HOURS_FIELD, text)
}

pub fn parse_rate(text: &str) -> ClaimResult<f64> {
    parse_amount(RATE_FIELD, text)
}

/// The stored total must stay finite even when both inputs are.
pub fn check_total(total: f64) -> ClaimResult<f64> {
    if total.is_finite() {
        Ok(total)
    } else {
        Err(ClaimError::validation(TOTAL_FIELD, "is too large"))
    }
}

/// Best-effort total for live feedback while the user is still typing.
/// Returns `None` for anything that does not parse; never fails.
pub fn preview_total(hours_text: &str, rate_text: &str) -> Option<f64> {
    let hours: f64 = hours_text.trim().parse().ok()?;
    let rate: f64 = rate_text.trim().parse().ok()?;
    let total = hours * rate;
    total.is_finite().then_some(total)
}
