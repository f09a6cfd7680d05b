//! # Pathfinder Core
//!
//! State core for the Pathfinder learning tracker.
//!
//! The kanban board that tracks topic progress lives here, together with
//! the optimistic move/rollback logic that keeps it in step with the
//! backend, and the panel state machine used by the notes and
//! knowledge-base pages. Nothing in this crate renders or routes.

pub mod config;
pub mod domain;
pub mod error;
pub mod manager;
pub mod storage;

// Re-export commonly used types
pub use config::{PathfinderConfig, SyncConfig};
pub use domain::{
    board::{Board, BoardConfig, Column},
    topic::{ColumnId, Topic, TopicId},
    view::{ViewEvent, ViewState},
};
pub use error::{PathfinderError, Result};
pub use manager::{BoardManager, MoveOutcome, Notice, PendingMove};
pub use storage::Persistence;
