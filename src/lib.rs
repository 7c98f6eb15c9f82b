pub mod claims;
pub mod cli;
pub mod db;
pub mod settings;
pub mod utils;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;

use claims::ClaimWorkflow;
use cli::Cli;
use db::Database;
use settings::SettingsStore;

/// Everything a command needs: settings plus the workflow bound to the
/// claims database in the data directory.
pub struct AppState {
    pub db: Database,
    pub workflow: ClaimWorkflow,
    pub settings: SettingsStore,
}

impl AppState {
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let settings = SettingsStore::in_dir(&data_dir)?;
        let database = Database::new(settings.database_path(&data_dir))?;
        let workflow = ClaimWorkflow::new(database.clone(), settings.currency_symbol());

        Ok(Self {
            db: database,
            workflow,
            settings,
        })
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    log::debug!("ClaimDesk starting with data dir {}", cli.data_dir.display());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async move {
        let state = AppState::open(cli.data_dir).map_err(|err| format!("Database Error: {err:#}"))?;
        state.db.initialize().await.map_err(|err| format!("{}: {err}", err.title()))?;
        cli::dispatch(&state, cli.command).await
    });

    match &result {
        Ok(output) => println!("{output}"),
        Err(message) => eprintln!("{message}"),
    }
    cli::exit_code(&result)
}
