use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a topic (e.g., t-1, t-42)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(String);

impl TopicId {
    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TopicId {
    type Err = crate::error::PathfinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::error::PathfinderError::InvalidTopicId(
                s.to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a status column (e.g., "Not Started", "In Progress")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the display label
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Machine status key for the label ("In Progress" -> "in_progress")
    pub fn status_key(&self) -> String {
        let mut key = String::with_capacity(self.0.len());
        let mut pending_sep = false;
        for ch in self.0.chars() {
            if ch.is_alphanumeric() {
                if pending_sep && !key.is_empty() {
                    key.push('_');
                }
                pending_sep = false;
                key.extend(ch.to_lowercase());
            } else {
                pending_sep = true;
            }
        }
        key
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A unit of learning work tracked on the board.
///
/// Status is not stored here; it is whichever column holds the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
}

impl Topic {
    /// Creates a new topic with the given ID and title
    pub fn new(id: TopicId, title: String) -> Self {
        Self {
            id,
            title,
            milestone_id: None,
        }
    }

    pub fn with_milestone(mut self, milestone_id: impl Into<String>) -> Self {
        self.milestone_id = Some(milestone_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_id_parsing() {
        let id = TopicId::from_str("t-1").unwrap();
        assert_eq!(id.as_str(), "t-1");

        let id = TopicId::from_str("  t-42 ").unwrap();
        assert_eq!(id.as_str(), "t-42");

        assert!(TopicId::from_str("").is_err());
        assert!(TopicId::from_str("   ").is_err());
    }

    #[test]
    fn test_status_key() {
        assert_eq!(ColumnId::from("Not Started").status_key(), "not_started");
        assert_eq!(ColumnId::from("In Progress").status_key(), "in_progress");
        assert_eq!(ColumnId::from("Completed").status_key(), "completed");
        assert_eq!(ColumnId::from("  Up -- Next ").status_key(), "up_next");
    }

    #[test]
    fn test_topic_serialization_without_milestone() {
        let topic = Topic::new(TopicId::from_str("t-1").unwrap(), "JSX".to_string());
        let json = serde_json::to_string(&topic).unwrap();

        assert!(!json.contains("milestone_id"));
        assert_eq!(json, r#"{"id":"t-1","title":"JSX"}"#);
    }

    #[test]
    fn test_topic_with_milestone() {
        let topic = Topic::new(TopicId::from_str("t-2").unwrap(), "Props".to_string())
            .with_milestone("m-3");
        let json = serde_json::to_string(&topic).unwrap();
        assert!(json.contains(r#""milestone_id":"m-3""#));
    }

    #[test]
    fn test_topic_deserialization_with_milestone() {
        let json = r#"{"id": "t-4", "title": "Todo app", "milestone_id": "m-1"}"#;
        let topic: Topic = serde_json::from_str(json).unwrap();

        assert_eq!(topic.id.as_str(), "t-4");
        assert_eq!(topic.milestone_id.as_deref(), Some("m-1"));
    }
}
