use crate::{
    domain::{Task, TaskId, TaskStatus},
    error::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
#[cfg(any(feature = "file-storage", feature = "sqlite-storage"))]
use std::path::PathBuf;
use std::sync::Arc;

pub mod memory;

#[cfg(feature = "file-storage")]
pub mod file;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite;

/// Repository trait for resolving and persisting tasks.
///
/// The positioning workflow only ever reads single records and writes the
/// moved card back; it relies on the repository for neighbor resolution
/// and leaves transaction and locking discipline to the backend.
/// Concurrent moves are last-write-wins.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task in the repository
    async fn find_all(&self) -> Result<Vec<Task>>;

    /// Returns the task with the given id, or `TaskNotFound`
    async fn find_by_id(&self, id: TaskId) -> Result<Task>;

    /// Returns the tasks in the given status column, ordered by sort position
    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>>;

    /// Returns the task with the highest sort position in the given column
    async fn find_last(&self, status: TaskStatus) -> Result<Option<Task>>;

    /// Stores the task, replacing any stored task with the same id
    async fn save(&self, task: &Task) -> Result<Task>;

    /// Stores all the given tasks
    async fn save_all(&self, tasks: &[Task]) -> Result<()>;

    /// Removes the task with the given id, or `TaskNotFound`
    async fn delete(&self, id: TaskId) -> Result<()>;
}

/// Storage backend selection, deserializable from application config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum BackendConfig {
    Memory,
    #[cfg(feature = "file-storage")]
    File { root: PathBuf },
    #[cfg(feature = "sqlite-storage")]
    Sqlite { path: PathBuf },
}

/// Opens the repository backend described by the configuration
pub fn open(config: &BackendConfig) -> Result<Arc<dyn TaskRepository>> {
    match config {
        BackendConfig::Memory => Ok(Arc::new(memory::MemoryRepository::new())),
        #[cfg(feature = "file-storage")]
        BackendConfig::File { root } => Ok(Arc::new(file::FileRepository::new(root))),
        #[cfg(feature = "sqlite-storage")]
        BackendConfig::Sqlite { path } => Ok(Arc::new(sqlite::SqliteRepository::open(path)?)),
    }
}
