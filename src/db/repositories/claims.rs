use anyhow::{Context, Result};
use chrono::{DurationRound, TimeDelta, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::{
    claims::{ClaimError, ClaimResult},
    db::{
        helpers::{parse_datetime, parse_status},
        models::{format_timestamp, Claim, ClaimStatus, NewClaim},
        Database,
    },
    log_info, log_warn,
};

const ENABLE_LOGS: bool = true;

const CLAIM_COLUMNS: &str =
    "Id, HoursWorked, HourlyRate, TotalAmount, Status, SubmittedAt, DocumentPath";

fn row_to_claim(row: &Row) -> Result<Claim> {
    let status: String = row.get("Status")?;
    let submitted_at: String = row.get("SubmittedAt")?;

    Ok(Claim {
        id: row.get("Id")?,
        hours_worked: row.get("HoursWorked")?,
        hourly_rate: row.get("HourlyRate")?,
        total_amount: row.get("TotalAmount")?,
        status: parse_status(&status)?,
        submitted_at: parse_datetime(&submitted_at, "SubmittedAt")?,
        document_path: row.get("DocumentPath")?,
    })
}

/// Outcome of a guarded status update, decided inside one DB task.
enum StatusUpdate {
    Applied,
    Missing,
    Blocked(ClaimStatus),
}

impl Database {
    /// Insert a new Pending claim and return its id.
    /// The total and submission time are fixed here and never change.
    pub async fn create_claim(&self, claim: NewClaim) -> ClaimResult<i64> {
        let id = self
            .execute(move |conn| {
                let total = claim.total_amount();
                let submitted_at = Utc::now()
                    .duration_trunc(TimeDelta::seconds(1))
                    .context("failed to truncate submission time")?;

                conn.execute(
                    "INSERT INTO Claims (HoursWorked, HourlyRate, TotalAmount, Status, SubmittedAt, DocumentPath)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        claim.hours_worked,
                        claim.hourly_rate,
                        total,
                        ClaimStatus::Pending.as_str(),
                        format_timestamp(&submitted_at),
                        claim.document_path,
                    ],
                )
                .context("failed to insert claim")?;

                Ok(conn.last_insert_rowid())
            })
            .await?;

        log_info!("Claim {id} submitted");
        Ok(id)
    }

    /// All claims with the given status, oldest first.
    /// Every call runs a fresh query.
    pub async fn list_claims_by_status(&self, status: ClaimStatus) -> ClaimResult<Vec<Claim>> {
        let claims = self
            .execute(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {CLAIM_COLUMNS}
                     FROM Claims
                     WHERE Status = ?1
                     ORDER BY Id ASC"
                ))?;

                let mut rows = stmt.query(params![status.as_str()])?;
                let mut claims = Vec::new();
                while let Some(row) = rows.next()? {
                    claims.push(row_to_claim(row)?);
                }

                Ok(claims)
            })
            .await?;

        Ok(claims)
    }

    pub async fn get_claim(&self, claim_id: i64) -> ClaimResult<Claim> {
        let claim = self
            .execute(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {CLAIM_COLUMNS}
                     FROM Claims
                     WHERE Id = ?1"
                ))?;

                let mut rows = stmt.query(params![claim_id])?;
                let claim = match rows.next()? {
                    Some(row) => Some(row_to_claim(row)?),
                    None => None,
                };
                Ok(claim)
            })
            .await?;

        claim.ok_or(ClaimError::NotFound { id: claim_id })
    }

    /// Move a Pending claim to a terminal status.
    ///
    /// Fails with `NotFound` when no claim has this id and with `Conflict`
    /// when the claim has already left Pending; the row is unchanged in both
    /// cases.
    pub async fn update_claim_status(
        &self,
        claim_id: i64,
        new_status: ClaimStatus,
    ) -> ClaimResult<()> {
        let outcome = self
            .execute(move |conn| {
                if ClaimStatus::Pending.can_transition_to(new_status) {
                    let rows_affected = conn
                        .execute(
                            "UPDATE Claims
                             SET Status = ?1
                             WHERE Id = ?2 AND Status = ?3",
                            params![
                                new_status.as_str(),
                                claim_id,
                                ClaimStatus::Pending.as_str()
                            ],
                        )
                        .context("failed to update claim status")?;

                    if rows_affected > 0 {
                        return Ok(StatusUpdate::Applied);
                    }
                }

                let current: Option<String> = conn
                    .query_row(
                        "SELECT Status FROM Claims WHERE Id = ?1",
                        params![claim_id],
                        |row| row.get(0),
                    )
                    .optional()?;

                match current {
                    Some(raw) => Ok(StatusUpdate::Blocked(parse_status(&raw)?)),
                    None => Ok(StatusUpdate::Missing),
                }
            })
            .await?;

        match outcome {
            StatusUpdate::Applied => {
                log_info!("Claim {claim_id} marked {new_status}");
                Ok(())
            }
            StatusUpdate::Missing => {
                log_warn!("Status update for unknown claim {claim_id}");
                Err(ClaimError::NotFound { id: claim_id })
            }
            StatusUpdate::Blocked(current) => {
                log_warn!("Claim {claim_id} is {current}; refusing move to {new_status}");
                Err(ClaimError::Conflict {
                    id: claim_id,
                    current,
                    requested: new_status,
                })
            }
        }
    }

    pub async fn get_claim_document_path(&self, claim_id: i64) -> ClaimResult<Option<String>> {
        let found = self
            .execute(move |conn| {
                let path = conn
                    .query_row(
                        "SELECT DocumentPath FROM Claims WHERE Id = ?1",
                        params![claim_id],
                        |row| row.get::<_, Option<String>>(0),
                    )
                    .optional()
                    .context("failed to read document path")?;
                Ok(path)
            })
            .await?;

        found.ok_or(ClaimError::NotFound { id: claim_id })
    }
}
