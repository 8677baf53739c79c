use crate::error::TaskboardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Status of a task, doubling as the board column it is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// All statuses in board display order
    pub fn all() -> [TaskStatus; 4] {
        [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
        ]
    }

    /// Stable integer code used by storage backends and the transport layer
    pub fn code(&self) -> i64 {
        match self {
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::Review => 3,
            Self::Done => 4,
        }
    }

    /// Resolves a status from its integer code
    pub fn from_code(code: i64) -> Result<Self, TaskboardError> {
        match code {
            1 => Ok(Self::Todo),
            2 => Ok(Self::InProgress),
            3 => Ok(Self::Review),
            4 => Ok(Self::Done),
            _ => Err(TaskboardError::UnknownStatus(code.to_string())),
        }
    }

    /// Whether dropping a card into this column claims it for the acting user
    pub fn claims_assignee(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Review => write!(f, "review"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(TaskboardError::UnknownStatus(s.to_string())),
        }
    }
}
