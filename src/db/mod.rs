use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tokio::sync::oneshot;

pub mod helpers;
pub mod migrations;
pub mod models;
pub mod repositories;

use crate::{claims::ClaimResult, log_error, log_info};
use migrations::run_migrations;

pub use models::{Claim, ClaimListEntry, ClaimStatus, NewClaim};

const ENABLE_LOGS: bool = true;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                log_error!("Claims store worker already gone at shutdown: {err}");
            }
            if let Err(join_err) = handle.join() {
                log_error!("Claims store worker panicked: {join_err:?}");
            }
        }
    }
}

/// Handle to the claims database.
///
/// One worker thread owns the SQLite connection and runs submitted tasks in
/// order, so writes never interleave. Each task borrows the connection only
/// while it runs. Clones share the same worker.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("claimdesk-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let context = format!(
                            "failed to open claims database {}",
                            path_for_thread.display()
                        );
                        let _ = ready_tx.send(Err(anyhow::Error::new(err).context(context)));
                        return;
                    }
                };

                let init_result =
                    run_migrations(&mut conn).context("failed to prepare claims schema");
                if ready_tx.send(init_result).is_err() {
                    log_error!("Claims store opener went away before the schema was ready");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                log_info!("Claims store worker stopped");
            })
            .context("failed to start claims store worker")?;

        ready_rx
            .recv()
            .context("claims store worker exited during startup")??;

        log_info!("Claims store open at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Ensures the claims table exists. Idempotent; existing rows are kept.
    pub async fn initialize(&self) -> ClaimResult<()> {
        self.execute(|conn| run_migrations(conn).context("failed to initialize schema"))
            .await?;
        Ok(())
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                log_error!("Claims store caller left before its result arrived");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("claims store worker is not running: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("claims store worker stopped mid-operation"))?
    }
}
