use crate::{
    domain::{Task, TaskId, TaskStatus, UserId},
    error::{Result, TaskboardError},
    repository::TaskRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    status      INTEGER NOT NULL,
    sort_order  REAL NOT NULL,
    assignee    TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks (status, sort_order);
";

const TASK_COLUMNS: &str = "id, title, description, status, sort_order, assignee, created_at, updated_at";

/// SQLite-based repository backend.
///
/// A single-table store over one connection guarded by an async mutex.
/// Statuses are stored by integer code, assignees as uuid strings,
/// timestamps as RFC 3339 text.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

/// Column values as read from a row, before domain decoding
type RawTask = (
    i64,
    String,
    Option<String>,
    i64,
    f64,
    Option<String>,
    String,
    String,
);

impl SqliteRepository {
    /// Opens (and migrates) the database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTask> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ))
    }

    fn decode(raw: RawTask) -> Result<Task> {
        let (id, title, description, status, sort_order, assignee, created_at, updated_at) = raw;
        Ok(Task {
            id: TaskId::new(id),
            title,
            description,
            status: TaskStatus::from_code(status)?,
            sort_order,
            assignee: assignee
                .map(|value| {
                    Uuid::parse_str(&value)
                        .map(UserId::from_uuid)
                        .map_err(|err| TaskboardError::StorageError(err.to_string()))
                })
                .transpose()?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn insert(conn: &Connection, task: &Task) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO tasks (id, title, description, status, sort_order, assignee, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id.value(),
                task.title,
                task.description,
                task.status.code(),
                task.sort_order,
                task.assignee.map(|a| a.as_uuid().to_string()),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| TaskboardError::StorageError(err.to_string()))
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn find_all(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))?;
        let rows = stmt.query_map([], Self::read_raw)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(Self::decode(row?)?);
        }
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task> {
        let conn = self.conn.lock().await;
        let raw = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id.value()],
                Self::read_raw,
            )
            .optional()?
            .ok_or_else(|| TaskboardError::TaskNotFound(id.to_string()))?;
        Self::decode(raw)
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE status = ?1 ORDER BY sort_order"
        ))?;
        let rows = stmt.query_map(params![status.code()], Self::read_raw)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(Self::decode(row?)?);
        }
        Ok(tasks)
    }

    async fn find_last(&self, status: TaskStatus) -> Result<Option<Task>> {
        let conn = self.conn.lock().await;
        let raw = conn
            .query_row(
                &format!(
                    "SELECT {TASK_COLUMNS} FROM tasks WHERE status = ?1 ORDER BY sort_order DESC LIMIT 1"
                ),
                params![status.code()],
                Self::read_raw,
            )
            .optional()?;
        raw.map(Self::decode).transpose()
    }

    async fn save(&self, task: &Task) -> Result<Task> {
        let conn = self.conn.lock().await;
        Self::insert(&conn, task)?;
        debug!(task = %task.id, "task written");
        Ok(task.clone())
    }

    async fn save_all(&self, tasks: &[Task]) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for task in tasks {
            Self::insert(&tx, task)?;
        }
        tx.commit()?;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let conn = self.conn.lock().await;
        let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.value()])?;
        if deleted == 0 {
            return Err(TaskboardError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}
