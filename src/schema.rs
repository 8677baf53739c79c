//! Transport-facing payload types.
//!
//! The board front-end posts form-shaped JSON with camelCase keys and
//! cannot express an absent sibling, so it sends `-1` instead. Both quirks
//! are resolved here, before any id reaches the domain layer.

use crate::domain::{TaskId, TaskStatus};
use crate::error::Result;
use serde::Deserialize;

/// Sentinel the transport layer uses for "no sibling on this side"
pub const NO_SIBLING: i64 = -1;

/// Incoming payload for a card move, as posted by the board front-end
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    #[serde(alias = "taskId")]
    pub task_id: i64,
    #[serde(alias = "statusId")]
    pub status_id: i64,
    #[serde(default, alias = "previousSiblingId")]
    pub previous_sibling_id: Option<i64>,
    #[serde(default, alias = "nextSiblingId")]
    pub next_sibling_id: Option<i64>,
}

/// A move request translated into domain terms, sentinel resolved away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub task_id: TaskId,
    pub status: TaskStatus,
    pub previous_sibling: Option<TaskId>,
    pub next_sibling: Option<TaskId>,
}

impl MoveRequest {
    /// Translates the wire form into domain terms.
    ///
    /// Rejects unknown status codes. A missing sibling field and the `-1`
    /// sentinel both map to `None`; only `-1` is special-cased, matching
    /// the front-end contract exactly.
    pub fn normalized(&self) -> Result<Move> {
        Ok(Move {
            task_id: TaskId::new(self.task_id),
            status: TaskStatus::from_code(self.status_id)?,
            previous_sibling: normalize_sibling(self.previous_sibling_id),
            next_sibling: normalize_sibling(self.next_sibling_id),
        })
    }
}

fn normalize_sibling(raw: Option<i64>) -> Option<TaskId> {
    match raw {
        None | Some(NO_SIBLING) => None,
        Some(id) => Some(TaskId::new(id)),
    }
}
