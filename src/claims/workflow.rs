use std::path::PathBuf;

use serde::Serialize;

use crate::{
    db::{Claim, ClaimListEntry, ClaimStatus, Database, NewClaim},
    log_debug, log_info, log_warn,
};

use super::{
    report::render_approved_report,
    validation::{check_total, parse_hours, parse_rate},
    ClaimResult,
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedClaim {
    pub id: i64,
    pub total_amount: f64,
}

/// Sequences validation and store calls for each user action.
#[derive(Clone)]
pub struct ClaimWorkflow {
    db: Database,
    currency_symbol: String,
}

impl ClaimWorkflow {
    pub fn new(db: Database, currency_symbol: impl Into<String>) -> Self {
        Self {
            db,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub async fn submit_claim(
        &self,
        hours_text: &str,
        rate_text: &str,
        document_path: Option<String>,
    ) -> ClaimResult<SubmittedClaim> {
        let hours = parse_hours(hours_text).inspect_err(|err| {
            log_warn!("Rejected claim submission: {err}");
        })?;
        let rate = parse_rate(rate_text).inspect_err(|err| {
            log_warn!("Rejected claim submission: {err}");
        })?;

        let claim = NewClaim {
            hours_worked: hours,
            hourly_rate: rate,
            document_path: document_path.filter(|path| !path.trim().is_empty()),
        };
        let total_amount = check_total(claim.total_amount()).inspect_err(|err| {
            log_warn!("Rejected claim submission: {err}");
        })?;
        let id = self.db.create_claim(claim).await?;

        log_info!(
            "Claim {id} awaiting review, total {}{total_amount:.2}",
            self.currency_symbol
        );
        Ok(SubmittedClaim { id, total_amount })
    }

    pub async fn pending_claims(&self) -> ClaimResult<Vec<Claim>> {
        self.db.list_claims_by_status(ClaimStatus::Pending).await
    }

    /// Review-list lines for the pending claims, each carrying its id.
    pub async fn review_list(&self) -> ClaimResult<Vec<ClaimListEntry>> {
        let claims = self.pending_claims().await?;
        Ok(claims
            .iter()
            .map(|claim| ClaimListEntry::from_claim(claim, &self.currency_symbol))
            .collect())
    }

    pub async fn claim(&self, claim_id: i64) -> ClaimResult<Claim> {
        self.db.get_claim(claim_id).await
    }

    pub async fn approve(&self, claim_id: i64) -> ClaimResult<Claim> {
        self.decide(claim_id, ClaimStatus::Approved).await
    }

    pub async fn reject(&self, claim_id: i64) -> ClaimResult<Claim> {
        self.decide(claim_id, ClaimStatus::Rejected).await
    }

    async fn decide(&self, claim_id: i64, status: ClaimStatus) -> ClaimResult<Claim> {
        self.db.update_claim_status(claim_id, status).await?;
        self.db.get_claim(claim_id).await
    }

    pub async fn document_path(&self, claim_id: i64) -> ClaimResult<Option<PathBuf>> {
        let path = self.db.get_claim_document_path(claim_id).await?;
        Ok(path.map(PathBuf::from))
    }

    pub async fn build_approved_report(&self) -> ClaimResult<String> {
        let approved = self.db.list_claims_by_status(ClaimStatus::Approved).await?;
        log_debug!("Rendering report for {} approved claims", approved.len());
        Ok(render_approved_report(&approved, &self.currency_symbol))
    }

    pub fn preview_total(&self, hours_text: &str, rate_text: &str) -> Option<f64> {
        super::validation::preview_total(hours_text, rate_text)
    }
}
