pub mod board;
pub mod topic;
pub mod view;

pub use board::{Board, BoardConfig, Column, MoveRecord};
pub use topic::{ColumnId, Topic, TopicId};
pub use view::{PlaceholderId, ViewEvent, ViewState};
