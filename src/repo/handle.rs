use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::{
    record::{Snapshot, UserId, UserRecord},
    store::{RecordStore, StoreError, StoreResult},
};

/// Failure surfaced by the repository to its callers.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Persistence failure, forwarded from the store unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The repository loop is gone; no further operations will apply.
    #[error("repository channel closed")]
    ChannelClosed,
}

/// Tunables for the repository loop.
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Capacity of the command queue feeding the single-writer loop.
    pub command_queue_bound: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
        }
    }
}

/// Cloneable async façade over the store.
///
/// Mutating calls never block the caller's thread and apply in issuance
/// order per caller. [`RepositoryHandle::observe_all`] hands out the live
/// snapshot query.
pub struct RepositoryHandle {
    cmd_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl Clone for RepositoryHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            snapshot_rx: self.snapshot_rx.clone(),
        }
    }
}

enum Command {
    Insert {
        record: UserRecord,
        resp: oneshot::Sender<Result<(), RepoError>>,
    },
    Update {
        record: UserRecord,
        resp: oneshot::Sender<Result<(), RepoError>>,
    },
    DeleteById {
        id: UserId,
        resp: oneshot::Sender<Result<(), RepoError>>,
    },
    DeleteAll {
        resp: oneshot::Sender<Result<(), RepoError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the single-writer repository loop over `store`.
///
/// The current table contents are read once to seed the snapshot channel,
/// so every subscriber sees a full snapshot immediately. Fails only if that
/// initial read fails.
pub fn spawn_repository(
    mut store: Box<dyn RecordStore>,
    config: RepositoryConfig,
) -> Result<RepositoryHandle, StoreError> {
    let initial = store.all()?;

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);

    let store = Arc::new(Mutex::new(store));

    tokio::spawn(async move {
        loop {
            let Some(cmd) = cmd_rx.recv().await else { break };
            if handle_command(cmd, &store, &snapshot_tx).await {
                break;
            }
        }
    });

    Ok(RepositoryHandle {
        cmd_tx,
        snapshot_rx,
    })
}

impl RepositoryHandle {
    /// Subscribes to the live "all records" query.
    ///
    /// The receiver holds the current snapshot at once and is notified
    /// after every committed mutation. Dropping it releases the
    /// subscription.
    pub fn observe_all(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Inserts `record`, replacing any record with the same id.
    pub async fn insert(&self, record: UserRecord) -> Result<(), RepoError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Insert { record, resp: tx })
            .await
            .map_err(|_| RepoError::ChannelClosed)?;
        rx.await.map_err(|_| RepoError::ChannelClosed)?
    }

    /// Updates `record` by id; an absent id is created (upsert semantics).
    pub async fn update(&self, record: UserRecord) -> Result<(), RepoError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Update { record, resp: tx })
            .await
            .map_err(|_| RepoError::ChannelClosed)?;
        rx.await.map_err(|_| RepoError::ChannelClosed)?
    }

    /// Deletes the record with `id`; absent ids are a no-op.
    pub async fn delete_by_id(&self, id: impl Into<UserId>) -> Result<(), RepoError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DeleteById {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RepoError::ChannelClosed)?;
        rx.await.map_err(|_| RepoError::ChannelClosed)?
    }

    /// Deletes every record.
    pub async fn delete_all(&self) -> Result<(), RepoError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DeleteAll { resp: tx })
            .await
            .map_err(|_| RepoError::ChannelClosed)?;
        rx.await.map_err(|_| RepoError::ChannelClosed)?
    }

    /// Stops the loop after all previously issued commands have applied.
    pub async fn shutdown(&self) -> Result<(), RepoError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RepoError::ChannelClosed)?;
        rx.await.map_err(|_| RepoError::ChannelClosed)
    }
}

/// Applies one command; returns true when the loop should stop.
async fn handle_command(
    cmd: Command,
    store: &Arc<Mutex<Box<dyn RecordStore>>>,
    snapshot_tx: &watch::Sender<Snapshot>,
) -> bool {
    match cmd {
        Command::Insert { record, resp } => {
            let id = record.id.clone();
            let res = apply(store, move |s| s.upsert(&record)).await;
            let _ = resp.send(publish(res, snapshot_tx, "insert", &id));
        }
        Command::Update { record, resp } => {
            let id = record.id.clone();
            let res = apply(store, move |s| s.upsert(&record)).await;
            let _ = resp.send(publish(res, snapshot_tx, "update", &id));
        }
        Command::DeleteById { id, resp } => {
            let target = id.clone();
            let res = apply(store, move |s| s.delete_by_id(&target)).await;
            let _ = resp.send(publish(res, snapshot_tx, "delete_by_id", &id));
        }
        Command::DeleteAll { resp } => {
            let res = apply(store, |s| s.delete_all()).await;
            let _ = resp.send(publish(res, snapshot_tx, "delete_all", ""));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

/// Runs one mutation plus the follow-up scan on the blocking pool.
///
/// The caller awaits the result before taking the next command, so
/// mutations serialize and observers only ever see committed states.
async fn apply<F>(
    store: &Arc<Mutex<Box<dyn RecordStore>>>,
    op: F,
) -> Result<Snapshot, RepoError>
where
    F: FnOnce(&mut dyn RecordStore) -> StoreResult<()> + Send + 'static,
{
    let store_ref = Arc::clone(store);
    tokio::task::spawn_blocking(move || {
        let mut store = store_ref.blocking_lock();
        op(store.as_mut())?;
        Ok(store.all()?)
    })
    .await
    .map_err(|_| RepoError::ChannelClosed)?
}

fn publish(
    res: Result<Snapshot, RepoError>,
    snapshot_tx: &watch::Sender<Snapshot>,
    op: &'static str,
    id: &str,
) -> Result<(), RepoError> {
    match res {
        Ok(snapshot) => {
            debug!(op, id, rows = snapshot.len(), "mutation committed");
            snapshot_tx.send_replace(snapshot);
            Ok(())
        }
        Err(err) => {
            warn!(op, id, error = %err, "mutation failed");
            Err(err)
        }
    }
}
