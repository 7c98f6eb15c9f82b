//! Command handlers behind the user-facing actions. Every failure comes back
//! as a display-ready message.

use std::path::PathBuf;

use serde::Serialize;

use crate::{
    claims::{ClaimError, SubmittedClaim},
    db::{Claim, ClaimListEntry},
    AppState,
};

fn to_message(err: ClaimError) -> String {
    format!("{}: {err}", err.title())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLookup {
    pub path: PathBuf,
    pub exists: bool,
}

pub async fn submit_claim(
    state: &AppState,
    hours: &str,
    rate: &str,
    document_path: Option<String>,
) -> Result<SubmittedClaim, String> {
    state
        .workflow
        .submit_claim(hours, rate, document_path)
        .await
        .map_err(to_message)
}

pub async fn get_pending_claims(state: &AppState) -> Result<Vec<ClaimListEntry>, String> {
    state.workflow.review_list().await.map_err(to_message)
}

pub async fn get_claim(state: &AppState, claim_id: i64) -> Result<Claim, String> {
    state.workflow.claim(claim_id).await.map_err(to_message)
}

pub async fn approve_claim(state: &AppState, claim_id: i64) -> Result<Claim, String> {
    state.workflow.approve(claim_id).await.map_err(to_message)
}

pub async fn reject_claim(state: &AppState, claim_id: i64) -> Result<Claim, String> {
    state.workflow.reject(claim_id).await.map_err(to_message)
}

/// Where the claim's supporting document lives. Opening it is left to the
/// caller's viewer.
pub async fn get_claim_document(state: &AppState, claim_id: i64) -> Result<DocumentLookup, String> {
    let path = state
        .workflow
        .document_path(claim_id)
        .await
        .map_err(to_message)?
        .ok_or_else(|| format!("Document not found for claim {claim_id}"))?;

    let exists = path.is_file();
    Ok(DocumentLookup { path, exists })
}

pub async fn generate_report(state: &AppState) -> Result<String, String> {
    state
        .workflow
        .build_approved_report()
        .await
        .map_err(to_message)
}

pub fn preview_total(state: &AppState, hours: &str, rate: &str) -> Option<f64> {
    state.workflow.preview_total(hours, rate)
}
