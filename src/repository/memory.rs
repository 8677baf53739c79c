use crate::{
    domain::{sorting::compare_positions, Task, TaskId, TaskStatus},
    error::{Result, TaskboardError},
    repository::TaskRepository,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory repository backend.
///
/// Holds tasks in a plain vector behind a read-write lock. Used by tests
/// and as the configured backend for ephemeral boards.
#[derive(Default)]
pub struct MemoryRepository {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }
}

#[async_trait]
impl TaskRepository for MemoryRepository {
    async fn find_all(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| TaskboardError::TaskNotFound(id.to_string()))
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .iter()
            .filter(|task| task.status == status)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| compare_positions(a.sort_order, b.sort_order));
        Ok(tasks)
    }

    async fn find_last(&self, status: TaskStatus) -> Result<Option<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|task| task.status == status)
            .max_by(|a, b| compare_positions(a.sort_order, b.sort_order))
            .cloned())
    }

    async fn save(&self, task: &Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|stored| stored.id == task.id) {
            Some(stored) => *stored = task.clone(),
            None => tasks.push(task.clone()),
        }
        Ok(task.clone())
    }

    async fn save_all(&self, new_tasks: &[Task]) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        for task in new_tasks {
            match tasks.iter_mut().find(|stored| stored.id == task.id) {
                Some(stored) => *stored = task.clone(),
                None => tasks.push(task.clone()),
            }
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(TaskboardError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, status: TaskStatus, sort_order: f64) -> Task {
        let mut task = Task::new(TaskId::new(id), format!("Task {id}"));
        task.set_status(status);
        task.set_sort_order(sort_order);
        task
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repository = MemoryRepository::new();
        let stored = repository
            .save(&task(1, TaskStatus::Todo, 10.0))
            .await
            .unwrap();
        assert_eq!(stored.id.value(), 1);

        let found = repository.find_by_id(TaskId::new(1)).await.unwrap();
        assert_eq!(found.title, "Task 1");
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repository = MemoryRepository::new();
        let result = repository.find_by_id(TaskId::new(404)).await;
        assert!(matches!(result, Err(TaskboardError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repository = MemoryRepository::new();
        repository
            .save(&task(1, TaskStatus::Todo, 10.0))
            .await
            .unwrap();

        let mut updated = task(1, TaskStatus::Todo, 10.0);
        updated.set_title("Renamed".to_string());
        repository.save(&updated).await.unwrap();

        assert_eq!(repository.find_all().await.unwrap().len(), 1);
        let found = repository.find_by_id(TaskId::new(1)).await.unwrap();
        assert_eq!(found.title, "Renamed");
    }

    #[tokio::test]
    async fn test_find_by_status_ordered_by_position() {
        let repository = MemoryRepository::with_tasks(vec![
            task(1, TaskStatus::Todo, 30.0),
            task(2, TaskStatus::Todo, 10.0),
            task(3, TaskStatus::InProgress, 5.0),
            task(4, TaskStatus::Todo, 20.0),
        ]);

        let todos = repository.find_by_status(TaskStatus::Todo).await.unwrap();
        let ids: Vec<i64> = todos.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[tokio::test]
    async fn test_find_last() {
        let repository = MemoryRepository::with_tasks(vec![
            task(1, TaskStatus::Todo, 10.0),
            task(2, TaskStatus::Todo, 30.0),
            task(3, TaskStatus::Todo, 20.0),
        ]);

        let last = repository.find_last(TaskStatus::Todo).await.unwrap();
        assert_eq!(last.unwrap().id.value(), 2);

        let empty = repository.find_last(TaskStatus::Done).await.unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_save_all() {
        let repository = MemoryRepository::new();
        repository
            .save_all(&[
                task(1, TaskStatus::Todo, 10.0),
                task(2, TaskStatus::Todo, 20.0),
            ])
            .await
            .unwrap();

        assert_eq!(repository.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let repository = MemoryRepository::with_tasks(vec![task(1, TaskStatus::Todo, 10.0)]);

        repository.delete(TaskId::new(1)).await.unwrap();
        assert!(repository.find_all().await.unwrap().is_empty());

        let result = repository.delete(TaskId::new(1)).await;
        assert!(matches!(result, Err(TaskboardError::TaskNotFound(_))));
    }
}
