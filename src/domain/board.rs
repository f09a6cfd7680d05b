use crate::domain::topic::{ColumnId, Topic, TopicId};
use crate::error::{PathfinderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A status column and the ordered topics it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub topics: Vec<Topic>,
}

impl Column {
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            topics: Vec::new(),
        }
    }

    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    fn position_of(&self, topic_id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id.as_str() == topic_id)
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnId>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Learning Board".to_string(),
            columns: vec![
                ColumnId::new("Not Started"),
                ColumnId::new("In Progress"),
                ColumnId::new("Completed"),
            ],
        }
    }
}

/// Where a topic was before a move and where it ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub topic: TopicId,
    pub from: ColumnId,
    pub from_index: usize,
    pub to: ColumnId,
    pub to_index: usize,
}

/// Kanban board state.
///
/// Columns are kept in display order. Every topic lives in exactly one
/// column; the only mutation after loading is [`Board::apply_move`] and its
/// inverse [`Board::undo_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    columns: Vec<Column>,
}

impl Board {
    /// Creates a board with the configured columns, all empty
    pub fn new(config: BoardConfig) -> Self {
        Self {
            name: config.name,
            columns: config.columns.into_iter().map(Column::new).collect(),
        }
    }

    /// Builds a board from already-populated columns, refusing malformed data
    pub fn from_columns(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let board = Self {
            name: name.into(),
            columns,
        };
        board.check_integrity()?;
        Ok(board)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Total number of topics across all columns
    pub fn topic_count(&self) -> usize {
        self.columns.iter().map(|c| c.topics.len()).sum()
    }

    /// Topic count per column, in display order
    pub fn column_counts(&self) -> Vec<(&ColumnId, usize)> {
        self.columns
            .iter()
            .map(|c| (&c.id, c.topics.len()))
            .collect()
    }

    /// The column currently holding a topic, i.e. its status
    pub fn status_of(&self, topic_id: &TopicId) -> Option<&ColumnId> {
        self.columns
            .iter()
            .find(|c| c.position_of(topic_id.as_str()).is_some())
            .map(|c| &c.id)
    }

    /// Resolves a drag id (topic or column) to the column it belongs to.
    ///
    /// A column id resolves to itself, which is how drops onto an empty
    /// column surface are recognised.
    pub fn locate_column(&self, id: &str) -> Option<&ColumnId> {
        self.locate_index(id).map(|idx| &self.columns[idx].id)
    }

    fn locate_index(&self, id: &str) -> Option<usize> {
        if let Some(idx) = self.columns.iter().position(|c| c.id.as_str() == id) {
            return Some(idx);
        }
        self.columns
            .iter()
            .position(|c| c.position_of(id).is_some())
    }

    /// Moves the topic `active_id` across columns to where `over_id` sits.
    ///
    /// Returns `None` and leaves the board untouched when either id is
    /// unknown, when `active_id` names a column, or when both resolve to
    /// the same column.
    pub fn apply_move(&mut self, active_id: &str, over_id: &str) -> Option<MoveRecord> {
        if self.columns.iter().any(|c| c.id.as_str() == active_id) {
            return None;
        }

        let from = self.locate_index(active_id)?;
        let to = self.locate_index(over_id)?;
        if from == to {
            return None;
        }

        let from_index = self.columns[from].position_of(active_id)?;
        let topic = self.columns[from].topics.remove(from_index);
        let from_id = self.columns[from].id.clone();

        let dest = &mut self.columns[to];
        let to_index = if dest.id.as_str() == over_id {
            dest.topics.len()
        } else {
            dest.position_of(over_id).unwrap_or(dest.topics.len())
        };

        let record = MoveRecord {
            topic: topic.id.clone(),
            from: from_id,
            from_index,
            to: dest.id.clone(),
            to_index,
        };
        dest.topics.insert(to_index, topic);

        Some(record)
    }

    /// Puts a moved topic back at its recorded source position.
    ///
    /// The source index is clamped to the column's current length, so this
    /// still succeeds if other moves have touched the column since.
    /// Returns `false` if the topic or source column no longer exists.
    pub fn undo_move(&mut self, record: &MoveRecord) -> bool {
        let Some(from) = self.columns.iter().position(|c| c.id == record.from) else {
            return false;
        };
        let Some(current) = self.locate_index(record.topic.as_str()) else {
            return false;
        };
        let Some(pos) = self.columns[current].position_of(record.topic.as_str()) else {
            return false;
        };

        let topic = self.columns[current].topics.remove(pos);
        let source = &mut self.columns[from];
        let index = record.from_index.min(source.topics.len());
        source.topics.insert(index, topic);
        true
    }

    /// Verifies unique column identities and that no topic is in two columns
    pub fn check_integrity(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        let mut topic_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(PathfinderError::DuplicateColumn(column.id.to_string()));
            }
            for topic in &column.topics {
                if !topic_ids.insert(topic.id.as_str()) {
                    return Err(PathfinderError::DuplicateTopic(topic.id.to_string()));
                }
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn topic(id: &str) -> Topic {
        Topic::new(TopicId::from_str(id).unwrap(), format!("Topic {id}"))
    }

    fn board(columns: &[(&str, &[&str])]) -> Board {
        let columns = columns
            .iter()
            .map(|(name, ids)| {
                Column::new(ColumnId::new(*name)).with_topics(ids.iter().map(|id| topic(id)).collect())
            })
            .collect();
        Board::from_columns("Test", columns).unwrap()
    }

    fn ids(board: &Board, column: &str) -> Vec<String> {
        board
            .column(&ColumnId::new(column))
            .unwrap()
            .topics
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[test]
    fn test_board_creation() {
        let board = Board::default();
        assert_eq!(board.columns().len(), 3);
        assert_eq!(board.topic_count(), 0);
        assert_eq!(board.columns()[1].id.as_str(), "In Progress");
    }

    #[test]
    fn test_locate_column() {
        let board = board(&[("A", &["x", "y"]), ("B", &[])]);

        assert_eq!(board.locate_column("y").map(|c| c.as_str()), Some("A"));
        assert_eq!(board.locate_column("B").map(|c| c.as_str()), Some("B"));
        assert_eq!(board.locate_column("nope"), None);
    }

    #[test]
    fn test_cross_column_move_preserves_sibling_order() {
        let mut board = board(&[("A", &["x", "y", "z"]), ("B", &["p", "q"])]);

        let record = board.apply_move("y", "q").unwrap();

        assert_eq!(ids(&board, "A"), vec!["x", "z"]);
        assert_eq!(ids(&board, "B"), vec!["p", "y", "q"]);
        assert_eq!(record.from_index, 1);
        assert_eq!(record.to_index, 1);
    }

    #[test]
    fn test_drop_on_column_appends() {
        let mut board = board(&[("A", &["x", "y"]), ("B", &["p", "q"]), ("C", &[])]);

        board.apply_move("x", "B").unwrap();
        assert_eq!(ids(&board, "B"), vec!["p", "q", "x"]);

        board.apply_move("y", "C").unwrap();
        assert_eq!(ids(&board, "C"), vec!["y"]);
        assert!(ids(&board, "A").is_empty());
    }

    #[test]
    fn test_invalid_target_is_noop() {
        let mut board = board(&[("A", &["x"]), ("B", &["p"])]);
        let before = board.clone();

        assert!(board.apply_move("x", "missing").is_none());
        assert!(board.apply_move("missing", "p").is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_same_column_is_noop() {
        let mut board = board(&[("A", &["x", "y"]), ("B", &[])]);
        let before = board.clone();

        assert!(board.apply_move("x", "y").is_none());
        assert!(board.apply_move("x", "A").is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_cannot_be_dragged() {
        let mut board = board(&[("A", &["x"]), ("B", &["p"])]);
        let before = board.clone();

        assert!(board.apply_move("A", "p").is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_undo_move_restores_position() {
        let mut board = board(&[("A", &["x", "y", "z"]), ("B", &["p", "q"])]);
        let before = board.clone();

        let record = board.apply_move("y", "p").unwrap();
        assert!(board.undo_move(&record));
        assert_eq!(board, before);
    }

    #[test]
    fn test_undo_move_clamps_index() {
        let mut board = board(&[("A", &["x", "y", "z"]), ("B", &["p"])]);

        let record = board.apply_move("z", "B").unwrap();
        board.apply_move("x", "B").unwrap();
        board.apply_move("y", "B").unwrap();

        assert!(board.undo_move(&record));
        assert_eq!(ids(&board, "A"), vec!["z"]);
        assert_eq!(ids(&board, "B"), vec!["p", "x", "y"]);
    }

    #[test]
    fn test_status_and_counts() {
        let board = board(&[("Not Started", &["t-1", "t-2"]), ("Completed", &["t-6"])]);

        let t1 = TopicId::from_str("t-1").unwrap();
        assert_eq!(board.status_of(&t1).map(|c| c.as_str()), Some("Not Started"));

        let counts: Vec<(String, usize)> = board
            .column_counts()
            .into_iter()
            .map(|(c, n)| (c.to_string(), n))
            .collect();
        assert_eq!(
            counts,
            vec![("Not Started".to_string(), 2), ("Completed".to_string(), 1)]
        );
    }

    #[test]
    fn test_integrity_rejects_duplicates() {
        let dup_topic = Board::from_columns(
            "Bad",
            vec![
                Column::new(ColumnId::new("A")).with_topics(vec![topic("x")]),
                Column::new(ColumnId::new("B")).with_topics(vec![topic("x")]),
            ],
        );
        assert!(matches!(dup_topic, Err(PathfinderError::DuplicateTopic(id)) if id == "x"));

        let dup_column = Board::from_columns(
            "Bad",
            vec![Column::new(ColumnId::new("A")), Column::new(ColumnId::new("A"))],
        );
        assert!(matches!(dup_column, Err(PathfinderError::DuplicateColumn(_))));
    }

    #[test]
    fn test_board_serialization() {
        let board = board(&[("A", &["x"]), ("B", &[])]);
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    proptest! {
        #[test]
        fn prop_moves_conserve_topics(moves in prop::collection::vec((0usize..12, 0usize..12), 0..40)) {
            let mut board = board(&[
                ("A", &["a1", "a2", "a3"]),
                ("B", &["b1", "b2"]),
                ("C", &["c1", "c2", "c3", "c4"]),
            ]);
            let names = ["a1", "a2", "a3", "b1", "b2", "c1", "c2", "c3", "c4", "A", "B", "C"];

            for (active, over) in moves {
                board.apply_move(names[active], names[over]);
                prop_assert_eq!(board.topic_count(), 9);
                prop_assert!(board.check_integrity().is_ok());
            }
        }
    }
}
