//! Board state manager.
//!
//! Owns the live [`Board`] and is the only thing that mutates it. A drop is
//! applied to the local board straight away so the next render already
//! shows it; the backend is told afterwards, and if it refuses (or does not
//! answer within the configured timeout) the move is reverted and a
//! [`Notice`] is queued for the view to show.

use crate::{
    config::SyncConfig,
    domain::{Board, ColumnId, MoveRecord, TopicId},
    error::{PathfinderError, Result},
    storage::Persistence,
};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Oldest notices are dropped past this many undrained ones
const MAX_NOTICES: usize = 32;

/// A move applied locally and not yet confirmed by the backend
#[derive(Debug)]
#[must_use = "a staged move must be confirmed, or it is never committed"]
pub struct PendingMove {
    record: MoveRecord,
    snapshot: Board,
    revision: u64,
}

impl PendingMove {
    pub fn topic(&self) -> &TopicId {
        &self.record.topic
    }

    pub fn from(&self) -> &ColumnId {
        &self.record.from
    }

    pub fn to(&self) -> &ColumnId {
        &self.record.to
    }
}

/// What happened to a drag once it was fully processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Dropped outside a valid target, or back onto its own column
    Ignored,
    Committed { topic: TopicId, to: ColumnId },
    /// The commit failed, but a later move already took the topic elsewhere
    Superseded { topic: TopicId },
    RolledBack {
        topic: TopicId,
        from: ColumnId,
        reason: String,
    },
}

/// Transient message for the user, e.g. after a rollback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

pub struct BoardManager<S: Persistence> {
    board: Board,
    store: Arc<S>,
    sync: SyncConfig,
    revision: u64,
    notices: VecDeque<Notice>,
}

impl<S: Persistence> BoardManager<S> {
    pub fn new(board: Board, store: Arc<S>, sync: SyncConfig) -> Self {
        Self {
            board,
            store,
            sync,
            revision: 0,
            notices: VecDeque::new(),
        }
    }

    /// Loads the board from the backend and takes ownership of it
    pub async fn load(store: Arc<S>, sync: SyncConfig) -> Result<Self> {
        let board = store.load_board().await?;
        board.check_integrity()?;
        info!(
            board = %board.name,
            columns = board.columns().len(),
            topics = board.topic_count(),
            "board loaded"
        );
        Ok(Self::new(board, store, sync))
    }

    /// Read-only view for rendering
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn locate_column(&self, id: &str) -> Option<&ColumnId> {
        self.board.locate_column(id)
    }

    /// Handles a finished drag end to end: optimistic move, commit, and
    /// rollback on failure.
    pub async fn move_item(&mut self, active_id: &str, over_id: &str) -> MoveOutcome {
        match self.stage_move(active_id, over_id) {
            Some(pending) => self.confirm(pending).await,
            None => MoveOutcome::Ignored,
        }
    }

    /// Applies a move to the local board without waiting for the backend.
    ///
    /// Returns `None` when the drag is ignored; the board is then untouched.
    pub fn stage_move(&mut self, active_id: &str, over_id: &str) -> Option<PendingMove> {
        let Some(record) = self.board.apply_move(active_id, over_id) else {
            debug!(active = active_id, over = over_id, "drag ignored");
            return None;
        };
        // Undoing the only change yields the exact pre-move board.
        let mut snapshot = self.board.clone();
        snapshot.undo_move(&record);

        self.revision += 1;
        debug!(
            topic = %record.topic,
            from = %record.from,
            to = %record.to,
            index = record.to_index,
            "move staged"
        );

        Some(PendingMove {
            record,
            snapshot,
            revision: self.revision,
        })
    }

    /// Commits a staged move, reverting it if the backend does not accept it.
    pub async fn confirm(&mut self, pending: PendingMove) -> MoveOutcome {
        let PendingMove {
            record,
            snapshot,
            revision,
        } = pending;

        match self.commit(&record).await {
            Ok(()) => {
                info!(
                    topic = %record.topic,
                    status = %record.to.status_key(),
                    "move committed"
                );
                MoveOutcome::Committed {
                    topic: record.topic,
                    to: record.to,
                }
            }
            Err(e) => {
                warn!(
                    topic = %record.topic,
                    from = %record.from,
                    to = %record.to,
                    error = %e,
                    "commit failed, rolling back"
                );
                if !self.rollback(&record, snapshot, revision) {
                    return MoveOutcome::Superseded {
                        topic: record.topic,
                    };
                }
                self.push_notice(format!(
                    "Could not move {} to {}; it is back in {}",
                    record.topic, record.to, record.from
                ));
                MoveOutcome::RolledBack {
                    topic: record.topic,
                    from: record.from,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn commit(&self, record: &MoveRecord) -> Result<()> {
        let timeout = self.sync.commit_timeout();
        match tokio::time::timeout(timeout, self.store.commit_move(&record.topic, &record.to))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(PathfinderError::CommitTimeout(timeout)),
        }
    }

    /// Reverts a failed move. Returns `false` when a later move has already
    /// taken the topic out of the failed move's destination; the board is
    /// then left as it is.
    fn rollback(&mut self, record: &MoveRecord, snapshot: Board, revision: u64) -> bool {
        if revision == self.revision {
            self.board = snapshot;
        } else if self.board.status_of(&record.topic) != Some(&record.to) {
            info!(
                topic = %record.topic,
                to = %record.to,
                "failed move superseded by a later move, nothing to revert"
            );
            return false;
        } else if !self.board.undo_move(record) {
            warn!(topic = %record.topic, "rollback target missing, board left as is");
            return false;
        }
        self.revision += 1;
        true
    }

    fn push_notice(&mut self, message: String) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            message,
            raised_at: Utc::now(),
        });
    }

    /// Takes all queued notices, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
