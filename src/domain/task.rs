use crate::domain::position::DEFAULT_POSITION;
use crate::domain::status::TaskStatus;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a task.
///
/// Integer-valued because the board transport addresses cards by integer
/// id (and reserves `-1` as its "no sibling" sentinel, translated away at
/// the schema boundary).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for TaskId {
    type Err = crate::error::TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| crate::error::TaskboardError::InvalidTaskId(s.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the kanban board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Sort position within the status column. Strictly increasing
    /// positions match display order top to bottom.
    pub sort_order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the first column with the default position
    pub fn new(id: TaskId, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            status: TaskStatus::Todo,
            sort_order: DEFAULT_POSITION,
            assignee: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Sets the description
    pub fn set_description(&mut self, description: String) {
        self.description = Some(description);
        self.updated_at = Utc::now();
    }

    /// Moves the task to a status column
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Sets the sort position within the current column
    pub fn set_sort_order(&mut self, sort_order: f64) {
        self.sort_order = sort_order;
        self.updated_at = Utc::now();
    }

    /// Assigns the task to a user
    pub fn assign_to(&mut self, user: UserId) {
        self.assignee = Some(user);
        self.updated_at = Utc::now();
    }

    /// Clears the assignee
    pub fn unassign(&mut self) {
        self.assignee = None;
        self.updated_at = Utc::now();
    }
}
