//! Claim data models.
//!
//! A `Claim` is one hourly-work expense submission. Its total is a snapshot
//! taken at submission time and is never recomputed from the rate fields.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    /// Approved and Rejected are terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }

    pub fn can_transition_to(&self, next: ClaimStatus) -> bool {
        matches!(self, ClaimStatus::Pending) && next.is_terminal()
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: i64,
    pub hours_worked: f64,
    pub hourly_rate: f64,
    pub total_amount: f64,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub document_path: Option<String>,
}

impl Claim {
    pub fn has_document(&self) -> bool {
        self.document_path.is_some()
    }

    /// Submission time exactly as it is stored.
    pub fn submitted_at_text(&self) -> String {
        format_timestamp(&self.submitted_at)
    }
}

/// Input for a new claim. `total_amount` is derived from the two rate fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub hours_worked: f64,
    pub hourly_rate: f64,
    pub document_path: Option<String>,
}

impl NewClaim {
    pub fn total_amount(&self) -> f64 {
        self.hours_worked * self.hourly_rate
    }
}

/// One line of the review list. The id travels next to the rendered label
/// so selection never has to recover it from text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimListEntry {
    pub id: i64,
    pub label: String,
}

impl ClaimListEntry {
    pub fn from_claim(claim: &Claim, currency_symbol: &str) -> Self {
        let document = if claim.has_document() {
            "Available"
        } else {
            "No Document"
        };
        Self {
            id: claim.id,
            label: format!(
                "ID: {}, Total: {}{:.2}, Status: {}, Document: {}",
                claim.id, currency_symbol, claim.total_amount, claim.status, document
            ),
        }
    }
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_moves_and_only_to_terminal_states() {
        assert!(ClaimStatus::Pending.can_transition_to(ClaimStatus::Approved));
        assert!(ClaimStatus::Pending.can_transition_to(ClaimStatus::Rejected));
        assert!(!ClaimStatus::Pending.can_transition_to(ClaimStatus::Pending));
        assert!(!ClaimStatus::Approved.can_transition_to(ClaimStatus::Rejected));
        assert!(!ClaimStatus::Rejected.can_transition_to(ClaimStatus::Approved));
    }

    #[test]
    fn total_is_product_of_rate_fields() {
        let claim = NewClaim {
            hours_worked: 7.5,
            hourly_rate: 80.0,
            document_path: None,
        };
        assert_eq!(claim.total_amount(), 600.0);
    }
}
