use crate::{
    domain::{sorting::compare_positions, Task, TaskId, TaskStatus},
    error::{Result, TaskboardError},
    repository::TaskRepository,
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::fs;
use tracing::debug;

/// File-based repository backend.
///
/// Stores one pretty-printed JSON document per task under a dot-directory
/// of the board root. Column queries scan the directory; boards small
/// enough for a single screen stay well within that.
pub struct FileRepository {
    root_path: PathBuf,
}

impl FileRepository {
    const BOARD_DIR: &'static str = ".taskboard";
    const TASKS_DIR: &'static str = "tasks";

    /// Creates a repository rooted at the given board directory
    pub fn new(board_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: board_root.as_ref().join(Self::BOARD_DIR),
        }
    }

    fn tasks_dir(&self) -> PathBuf {
        self.root_path.join(Self::TASKS_DIR)
    }

    fn task_file(&self, id: TaskId) -> PathBuf {
        self.tasks_dir().join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn list_task_ids(&self) -> Result<Vec<TaskId>> {
        let tasks_dir = self.tasks_dir();

        if !tasks_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&tasks_dir).await?;
        let mut ids: Vec<TaskId> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if let Ok(id) = TaskId::from_str(stem) {
                        ids.push(id);
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl TaskRepository for FileRepository {
    async fn find_all(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for id in self.list_task_ids().await? {
            tasks.push(self.find_by_id(id).await?);
        }
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task> {
        let file_path = self.task_file(id);

        if !file_path.exists() {
            return Err(TaskboardError::TaskNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let task: Task = serde_json::from_str(&contents)?;

        Ok(task)
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = Vec::new();
        for id in self.list_task_ids().await? {
            let task = self.find_by_id(id).await?;
            if task.status == status {
                tasks.push(task);
            }
        }
        tasks.sort_by(|a, b| compare_positions(a.sort_order, b.sort_order));
        Ok(tasks)
    }

    async fn find_last(&self, status: TaskStatus) -> Result<Option<Task>> {
        Ok(self.find_by_status(status).await?.into_iter().last())
    }

    async fn save(&self, task: &Task) -> Result<Task> {
        self.ensure_directory_exists(&self.tasks_dir()).await?;

        let json = serde_json::to_string_pretty(task)?;
        let file_path = self.task_file(task.id);

        fs::write(&file_path, json).await?;
        debug!(task = %task.id, path = %file_path.display(), "task written");
        Ok(task.clone())
    }

    async fn save_all(&self, tasks: &[Task]) -> Result<()> {
        for task in tasks {
            self.save(task).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let file_path = self.task_file(id);

        if !file_path.exists() {
            return Err(TaskboardError::TaskNotFound(id.to_string()));
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(id: i64, status: TaskStatus, sort_order: f64) -> Task {
        let mut task = Task::new(TaskId::new(id), format!("Task {id}"));
        task.set_status(status);
        task.set_sort_order(sort_order);
        task
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        let mut stored = task(1, TaskStatus::Todo, 10.0);
        stored.set_description("A description".to_string());
        repository.save(&stored).await.unwrap();

        let loaded = repository.find_by_id(TaskId::new(1)).await.unwrap();
        assert_eq!(loaded.id, stored.id);
        assert_eq!(loaded.title, stored.title);
        assert_eq!(loaded.description, stored.description);
        assert_eq!(loaded.sort_order, stored.sort_order);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        let result = repository.find_by_id(TaskId::new(1)).await;
        assert!(matches!(result, Err(TaskboardError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_empty_board() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        assert!(repository.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_status_ordered_by_position() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        repository
            .save_all(&[
                task(1, TaskStatus::Todo, 30.0),
                task(2, TaskStatus::Todo, 10.0),
                task(3, TaskStatus::InProgress, 5.0),
                task(4, TaskStatus::Todo, 20.0),
            ])
            .await
            .unwrap();

        let todos = repository.find_by_status(TaskStatus::Todo).await.unwrap();
        let ids: Vec<i64> = todos.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[tokio::test]
    async fn test_find_last() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        repository
            .save_all(&[
                task(1, TaskStatus::Todo, 10.0),
                task(2, TaskStatus::Todo, 30.0),
            ])
            .await
            .unwrap();

        let last = repository.find_last(TaskStatus::Todo).await.unwrap();
        assert_eq!(last.unwrap().id.value(), 2);
        assert!(repository
            .find_last(TaskStatus::Done)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        repository.save(&task(1, TaskStatus::Todo, 10.0)).await.unwrap();

        let mut updated = task(1, TaskStatus::Todo, 15.0);
        updated.set_title("Renamed".to_string());
        repository.save(&updated).await.unwrap();

        let all = repository.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Renamed");
        assert_eq!(all[0].sort_order, 15.0);
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FileRepository::new(temp_dir.path());

        repository.save(&task(1, TaskStatus::Todo, 10.0)).await.unwrap();
        repository.delete(TaskId::new(1)).await.unwrap();

        assert!(repository.find_all().await.unwrap().is_empty());

        let result = repository.delete(TaskId::new(1)).await;
        assert!(matches!(result, Err(TaskboardError::TaskNotFound(_))));
    }
}
