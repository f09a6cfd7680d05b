use crate::{
    domain::{Board, BoardConfig, ColumnId, TopicId},
    error::{PathfinderError, Result},
    storage::Persistence,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const DATA_DIR: &'static str = ".pathfinder";
    const BOARD_FILE: &'static str = "board.json";

    /// Creates a new FileStore for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::DATA_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Creates the data directory and an empty board if none exists yet
    pub async fn initialize(&self, config: BoardConfig) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.board_file().exists() {
            self.save_board(&Board::new(config)).await?;
        }

        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }

    /// Overwrites the stored board
    pub async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(), json).await?;

        Ok(())
    }
}

#[async_trait]
impl Persistence for FileStore {
    async fn load_board(&self) -> Result<Board> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(PathfinderError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        let board: Board = serde_json::from_str(&contents)?;

        Ok(board)
    }

    async fn commit_move(&self, topic: &TopicId, to: &ColumnId) -> Result<()> {
        let mut board = self.load_board().await?;

        if board.column(to).is_none() {
            return Err(PathfinderError::ColumnNotFound(to.to_string()));
        }
        if board.status_of(topic).is_none() {
            return Err(PathfinderError::TopicNotFound(topic.to_string()));
        }

        // Position is client-side only; the store keeps membership.
        if board.apply_move(topic.as_str(), to.as_str()).is_some() {
            self.save_board(&board).await?;
        }

        Ok(())
    }
}
