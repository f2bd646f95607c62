//! List controller: bridges user gestures to repository calls and keeps a
//! display-ready snapshot current.

use tokio::sync::watch;

use crate::{
    edit::{Decision, EditMode, EditRequest, EditResult},
    record::{Snapshot, UserRecord},
    repo::handle::{RepoError, RepositoryHandle},
};

/// Read side of the roster list plus the gesture entry points.
///
/// The controller never mutates its snapshot as committed state: swipes
/// remove rows optimistically, and every arriving notification overwrites
/// the whole snapshot with the store's ground truth.
pub struct ListController {
    repo: RepositoryHandle,
    updates: watch::Receiver<Snapshot>,
    rows: Snapshot,
}

impl ListController {
    /// Builds a controller subscribed to `repo`'s live query.
    ///
    /// The display snapshot starts at the current table contents.
    pub fn new(repo: RepositoryHandle) -> Self {
        let mut updates = repo.observe_all();
        let rows = updates.borrow_and_update().clone();
        Self {
            repo,
            updates,
            rows,
        }
    }

    /// Current display snapshot.
    pub fn rows(&self) -> &[UserRecord] {
        &self.rows
    }

    /// Waits for the next notification and replaces the display snapshot.
    ///
    /// Errors with [`RepoError::ChannelClosed`] once the repository loop is
    /// gone and no further notifications can arrive.
    pub async fn next_snapshot(&mut self) -> Result<&[UserRecord], RepoError> {
        self.updates
            .changed()
            .await
            .map_err(|_| RepoError::ChannelClosed)?;
        self.rows = self.updates.borrow_and_update().clone();
        Ok(&self.rows)
    }

    /// Catches up to the latest published snapshot without waiting.
    ///
    /// Returns true when the display snapshot changed.
    pub fn sync_now(&mut self) -> bool {
        match self.updates.has_changed() {
            Ok(true) => {
                self.rows = self.updates.borrow_and_update().clone();
                true
            }
            _ => false,
        }
    }

    /// Starts the create flow: an edit request with empty fields.
    pub fn begin_add(&self) -> EditRequest {
        EditRequest::create()
    }

    /// Starts the edit flow for the row at `position`.
    ///
    /// Returns `None` when the position is stale (the row vanished under a
    /// racing delete); the next snapshot resolves the race.
    pub fn begin_edit(&self, position: usize) -> Option<EditRequest> {
        self.rows.get(position).map(EditRequest::edit)
    }

    /// Consumes the edit screen's completion value.
    ///
    /// Create mode inserts, edit mode updates, cancellation performs no
    /// repository call.
    pub async fn finish_edit(&self, result: EditResult) -> Result<(), RepoError> {
        match result {
            EditResult::Confirmed { record, mode } => match mode {
                EditMode::Create => self.repo.insert(record).await,
                EditMode::Edit => self.repo.update(record).await,
            },
            EditResult::Cancelled => Ok(()),
        }
    }

    /// Handles a left-or-right swipe on the row at `position`.
    ///
    /// The row leaves the display snapshot immediately; the delete then
    /// runs against the store. If the delete fails, the row reappears with
    /// the next authoritative snapshot. Stale positions are a no-op.
    pub async fn swipe_delete(&mut self, position: usize) -> Result<(), RepoError> {
        if position >= self.rows.len() {
            return Ok(());
        }
        let record = self.rows.remove(position);
        self.repo.delete_by_id(record.id).await
    }

    /// Handles the delete-all prompt's outcome.
    pub async fn delete_all(&self, decision: Decision) -> Result<(), RepoError> {
        match decision {
            Decision::Confirmed => self.repo.delete_all().await,
            Decision::Cancelled => Ok(()),
        }
    }
}
