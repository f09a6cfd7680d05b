//! Panel state for the notes and knowledge-base pages.
//!
//! The page shows a list, a single item, or an editor. Which one is an
//! explicit state rather than a combination of route flags, so every
//! transition can be checked without rendering anything.

use crate::error::{PathfinderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Which panel the page is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum ViewState<Id> {
    List,
    Viewing(Id),
    Editing(Id),
    Creating,
}

/// User actions that drive the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent<Id> {
    /// An item was picked from the list
    Select(Id),
    /// Edit was pressed on the viewed item
    Edit,
    /// "New" was pressed
    New,
    /// The editor saved; carries the id of the saved item, which must be
    /// the edited one when saving an edit
    Saved(Id),
    /// The editor was dismissed without saving
    Cancel,
    /// The current item was deleted
    Deleted,
    /// Explicit back navigation
    Back,
}

impl<Id> Default for ViewState<Id> {
    fn default() -> Self {
        Self::List
    }
}

impl<Id> ViewState<Id> {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Viewing(_) => "viewing",
            Self::Editing(_) => "editing",
            Self::Creating => "creating",
        }
    }

    /// The item currently selected, if any
    pub fn selected(&self) -> Option<&Id> {
        match self {
            Self::Viewing(id) | Self::Editing(id) => Some(id),
            Self::List | Self::Creating => None,
        }
    }

    pub fn is_editor_open(&self) -> bool {
        matches!(self, Self::Editing(_) | Self::Creating)
    }
}

impl<Id> fmt::Display for ViewState<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<Id> ViewEvent<Id> {
    fn name(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Edit => "edit",
            Self::New => "new",
            Self::Saved(_) => "saved",
            Self::Cancel => "cancel",
            Self::Deleted => "deleted",
            Self::Back => "back",
        }
    }
}

impl<Id: Clone + PartialEq> ViewState<Id> {
    /// Computes the next state, or rejects the event for this state.
    pub fn next(&self, event: ViewEvent<Id>) -> Result<Self> {
        let next = match (self, event) {
            (_, ViewEvent::Deleted | ViewEvent::Back) => Self::List,

            (Self::List | Self::Viewing(_), ViewEvent::Select(id)) => Self::Viewing(id),
            (Self::List | Self::Viewing(_), ViewEvent::New) => Self::Creating,
            (Self::Viewing(id), ViewEvent::Edit) => Self::Editing(id.clone()),

            (Self::Editing(current), ViewEvent::Saved(id)) if *current == id => Self::Viewing(id),
            (Self::Creating, ViewEvent::Saved(id)) => Self::Viewing(id),
            (Self::Editing(id), ViewEvent::Cancel) => Self::Viewing(id.clone()),
            (Self::Creating, ViewEvent::Cancel) => Self::List,

            (from, event) => {
                return Err(PathfinderError::InvalidViewTransition {
                    from: from.name().to_string(),
                    event: event.name().to_string(),
                })
            }
        };
        Ok(next)
    }

    /// Applies an event in place; on rejection the state is unchanged.
    pub fn apply(&mut self, event: ViewEvent<Id>) -> Result<()> {
        let next = self.next(event)?;
        debug!(from = %self, to = %next, "view transition");
        *self = next;
        Ok(())
    }
}

/// Locally generated id for an item the server has not numbered yet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceholderId(String);

impl PlaceholderId {
    const PREFIX: &'static str = "local-";

    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_placeholder(id: &str) -> bool {
        id.starts_with(Self::PREFIX)
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
