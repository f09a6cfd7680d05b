use crate::{
    domain::{Board, ColumnId, TopicId},
    error::{PathfinderError, Result},
    storage::Persistence,
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;

/// How the simulated backend answers commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMode {
    Never,
    Next(usize),
    Always,
}

#[derive(Debug)]
struct Inner {
    board: Board,
    failures: FailureMode,
    commits: Vec<(TopicId, ColumnId)>,
}

/// In-memory backend with an artificial response delay.
///
/// Stands in for the topic service while it has no real store, and lets
/// tests make commits fail on demand.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    delay: Duration,
}

impl MemoryStore {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Mutex::new(Inner {
                board,
                failures: FailureMode::Never,
                commits: Vec::new(),
            }),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Rejects the next `count` commits
    pub async fn fail_next(&self, count: usize) {
        self.inner.lock().await.failures = FailureMode::Next(count);
    }

    /// Rejects every commit from now on
    pub async fn fail_always(&self) {
        self.inner.lock().await.failures = FailureMode::Always;
    }

    pub async fn recover(&self) {
        self.inner.lock().await.failures = FailureMode::Never;
    }

    /// Commits accepted so far, oldest first
    pub async fn commits(&self) -> Vec<(TopicId, ColumnId)> {
        self.inner.lock().await.commits.clone()
    }

    /// The backend's own view of the board
    pub async fn stored_board(&self) -> Board {
        self.inner.lock().await.board.clone()
    }
}

#[async_trait]
impl Persistence for MemoryStore {
    async fn load_board(&self) -> Result<Board> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.inner.lock().await.board.clone())
    }

    async fn commit_move(&self, topic: &TopicId, to: &ColumnId) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut inner = self.inner.lock().await;
        let failures = inner.failures;
        match failures {
            FailureMode::Never => {}
            FailureMode::Always => {
                return Err(PathfinderError::StorageError(format!(
                    "simulated failure updating {topic}"
                )))
            }
            FailureMode::Next(remaining) => {
                inner.failures = if remaining <= 1 {
                    FailureMode::Never
                } else {
                    FailureMode::Next(remaining - 1)
                };
                if remaining > 0 {
                    return Err(PathfinderError::StorageError(format!(
                        "simulated failure updating {topic}"
                    )));
                }
            }
        }

        if inner.board.column(to).is_none() {
            return Err(PathfinderError::ColumnNotFound(to.to_string()));
        }
        if inner.board.status_of(topic).is_none() {
            return Err(PathfinderError::TopicNotFound(topic.to_string()));
        }

        inner.board.apply_move(topic.as_str(), to.as_str());
        inner.commits.push((topic.clone(), to.clone()));
        Ok(())
    }
}
