//! Item type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of entity an action record refers to.
///
/// Only task, project, and note have registered entity mutators; workspace
/// and user actions can be logged by older clients but are rejected by the
/// recorder and can never be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A task on a kanban board.
    Task,
    /// A project grouping tasks.
    Project,
    /// A free-form note.
    Note,
    /// A workspace (no mutator registered).
    Workspace,
    /// A user account (no mutator registered).
    User,
}

impl ItemType {
    /// Return the item type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Note => "note",
            Self::Workspace => "workspace",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = planhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "project" => Ok(Self::Project),
            "note" => Ok(Self::Note),
            "workspace" => Ok(Self::Workspace),
            "user" => Ok(Self::User),
            _ => Err(planhub_core::AppError::validation(format!(
                "Invalid item type: '{s}'. Expected one of: task, project, note, workspace, user"
            ))),
        }
    }
}
