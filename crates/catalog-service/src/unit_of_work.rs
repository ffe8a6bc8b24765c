//! Per-request unit of work.
//!
//! A [`UnitOfWork`] owns one transaction for the lifetime of one service
//! call. Repository work is submitted through [`UnitOfWork::run`] and the
//! outcome is decided once, in [`UnitOfWork::finish`]: commit on `Ok`,
//! roll back on any `Err`.
//!
//! In [`ExecutionMode::Spawned`] every `run` spawns exactly one task that
//! resolves a one-shot channel, and the caller awaits that single value
//! before continuing. The spawned tasks live in a `JoinSet` that `finish`
//! drains before the transaction is finalized.
//!
//! Dropping a unit of work without finishing it (a cancelled or timed-out
//! request) aborts its tasks and drops the transaction, which rolls it back.

use catalog_config::ExecutionMode;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::Database;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Transaction handle shared with the work closures of one unit of work.
pub type SharedTx<Tx> = Arc<Mutex<Tx>>;

/// One transaction plus the tasks working inside it.
pub struct UnitOfWork<D: Database> {
    db: Arc<D>,
    tx: SharedTx<D::Tx>,
    mode: ExecutionMode,
    tasks: JoinSet<()>,
}

impl<D: Database> UnitOfWork<D> {
    /// Opens a transaction.
    pub async fn begin(db: Arc<D>, mode: ExecutionMode) -> CatalogResult<Self> {
        let tx = db.begin().await?;
        debug!("Transaction opened ({} execution)", mode);
        Ok(Self {
            db,
            tx: Arc::new(Mutex::new(tx)),
            mode,
            tasks: JoinSet::new(),
        })
    }

    /// Returns the execution mode.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Runs one piece of repository work inside the transaction and returns its result.
    pub async fn run<T, F, Fut>(&mut self, work: F) -> CatalogResult<T>
    where
        T: Send + 'static,
        F: FnOnce(SharedTx<D::Tx>) -> Fut + Send + 'static,
        Fut: Future<Output = CatalogResult<T>> + Send + 'static,
    {
        let tx = Arc::clone(&self.tx);
        match self.mode {
            ExecutionMode::Inline => work(tx).await,
            ExecutionMode::Spawned => {
                let (sender, receiver) = oneshot::channel();
                self.tasks.spawn(async move {
                    // The receiver is gone only if the request was cancelled.
                    let _ = sender.send(work(tx).await);
                });
                receiver
                    .await
                    .map_err(|_| CatalogError::internal("Repository task ended without a result"))?
            }
        }
    }

    /// Waits for outstanding tasks, then commits on `Ok` or rolls back on `Err`.
    ///
    /// Returns `result` unchanged, except that a failed commit replaces `Ok`
    /// with the commit error.
    pub async fn finish<T>(self, result: CatalogResult<T>) -> CatalogResult<T> {
        let Self { db, tx, mut tasks, .. } = self;

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!("Repository task failed: {}", e);
            }
        }

        let tx = match Arc::try_unwrap(tx) {
            Ok(tx) => tx.into_inner(),
            Err(_) => {
                error!("Transaction still shared after all work finished; rolling back");
                return Err(CatalogError::internal("Transaction still in use"));
            }
        };

        match result {
            Ok(value) => {
                db.commit(tx).await?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = db.rollback(tx).await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                debug!("Transaction rolled back: {}", e);
                Err(e)
            }
        }
    }
}

impl<D: Database> std::fmt::Debug for UnitOfWork<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("mode", &self.mode)
            .field("pending_tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
