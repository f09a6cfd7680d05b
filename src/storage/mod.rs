use crate::{
    domain::{Board, ColumnId, TopicId},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStore;
pub use memory::MemoryStore;

/// Backend that owns durable topic state.
///
/// The board manager never hands it the live board; it only reports which
/// column a topic was dropped into.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Loads the board the manager starts from
    async fn load_board(&self) -> Result<Board>;

    /// Records that a topic now belongs to the given column
    async fn commit_move(&self, topic: &TopicId, to: &ColumnId) -> Result<()>;
}
