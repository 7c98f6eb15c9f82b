use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::ClaimStatus;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_status(value: &str) -> Result<ClaimStatus> {
    match value {
        "Pending" => Ok(ClaimStatus::Pending),
        "Approved" => Ok(ClaimStatus::Approved),
        "Rejected" => Ok(ClaimStatus::Rejected),
        other => Err(anyhow!("unknown claim status {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stored_status() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
        ] {
            assert_eq!(parse_status(status.as_str()).unwrap(), status);
        }
        assert!(parse_status("pending").is_err());
    }

    #[test]
    fn parse_datetime_names_the_field() {
        let err = parse_datetime("yesterday", "SubmittedAt").unwrap_err();
        assert!(err.to_string().contains("SubmittedAt"));
    }
}
