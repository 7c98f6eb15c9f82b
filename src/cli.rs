use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use crate::{
    claims::{commands, ClaimError},
    AppState,
};

#[derive(Debug, Parser)]
#[command(
    name = "claimdesk",
    about = "Submit, review and report on hourly-work claims",
    after_help = "Examples:\n  claimdesk submit --hours 10 --rate 150\n  claimdesk pending\n  claimdesk approve 1\n  claimdesk report --output approved.txt"
)]
pub struct Cli {
    #[arg(long, global = true, default_value = ".", help = "Directory holding claims.db and settings.json")]
    pub data_dir: PathBuf,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Submit a new claim for review")]
    Submit {
        #[arg(long, allow_hyphen_values = true)]
        hours: String,
        #[arg(long, allow_hyphen_values = true)]
        rate: String,
        #[arg(long, help = "Supporting document to attach")]
        document: Option<PathBuf>,
    },
    #[command(about = "List claims awaiting review")]
    Pending,
    #[command(about = "Show a single claim")]
    Show { id: i64 },
    #[command(about = "Approve a pending claim")]
    Approve { id: i64 },
    #[command(about = "Reject a pending claim")]
    Reject { id: i64 },
    #[command(about = "Print the supporting document path of a claim")]
    Document { id: i64 },
    #[command(about = "Report on approved claims")]
    Report {
        #[arg(long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(about = "Preview the total for partially typed input")]
    Preview {
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        hours: String,
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        rate: String,
    },
    #[command(about = "Show or change settings")]
    Settings {
        #[arg(long, help = "Currency symbol used in labels and reports")]
        currency: Option<String>,
    },
}

pub async fn dispatch(state: &AppState, command: Command) -> Result<String, String> {
    let symbol = state.workflow.currency_symbol().to_string();

    match command {
        Command::Submit {
            hours,
            rate,
            document,
        } => {
            let document = document.map(document_text).transpose()?;
            let submitted = commands::submit_claim(state, &hours, &rate, document).await?;
            Ok(format!(
                "Claim {} submitted! Total Amount: {symbol}{:.2}",
                submitted.id, submitted.total_amount
            ))
        }
        Command::Pending => {
            let entries = commands::get_pending_claims(state).await?;
            if entries.is_empty() {
                return Ok("No pending claims.".to_string());
            }
            Ok(entries
                .into_iter()
                .map(|entry| entry.label)
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Show { id } => {
            let claim = commands::get_claim(state, id).await?;
            serde_json::to_string_pretty(&claim).map_err(|err| err.to_string())
        }
        Command::Approve { id } => {
            let claim = commands::approve_claim(state, id).await?;
            Ok(format!("Claim {} {}.", claim.id, claim.status))
        }
        Command::Reject { id } => {
            let claim = commands::reject_claim(state, id).await?;
            Ok(format!("Claim {} {}.", claim.id, claim.status))
        }
        Command::Document { id } => {
            let lookup = commands::get_claim_document(state, id).await?;
            if lookup.exists {
                Ok(lookup.path.display().to_string())
            } else {
                Err(format!(
                    "Document not found: {} is missing on disk",
                    lookup.path.display()
                ))
            }
        }
        Command::Report { output } => {
            let report = commands::generate_report(state).await?;
            match output {
                Some(path) => {
                    fs::write(&path, &report).map_err(|err| {
                        format!("Failed to save report to {}: {err}", path.display())
                    })?;
                    Ok(format!("Report saved to {}", path.display()))
                }
                None => Ok(report),
            }
        }
        Command::Preview { hours, rate } => Ok(match commands::preview_total(state, &hours, &rate) {
            Some(total) => format!("Total Amount: {symbol}{total:.2}"),
            None => "Enter numbers for hours and rate to see the total.".to_string(),
        }),
        Command::Settings { currency } => {
            if let Some(currency) = currency {
                state
                    .settings
                    .update_currency_symbol(&currency)
                    .map_err(|err| format!("{err:#}"))?;
            }
            serde_json::to_string_pretty(&state.settings.snapshot()).map_err(|err| err.to_string())
        }
    }
}

/// Stored paths are text; a path that is not valid UTF-8 is refused rather
/// than stored lossily.
fn document_text(path: PathBuf) -> Result<String, String> {
    path.into_os_string().into_string().map_err(|raw| {
        let err = ClaimError::validation(
            "document",
            format!("{} is not valid UTF-8", raw.to_string_lossy()),
        );
        format!("{}: {err}", err.title())
    })
}

pub fn exit_code(result: &Result<String, String>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
