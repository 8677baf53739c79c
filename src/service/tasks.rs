use crate::{
    domain::{position_between, step_offsets, Task, TaskId, TaskStatus, User},
    error::Result,
    repository::TaskRepository,
    schema::Move,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Workflow operations over the task board.
///
/// Constructed once per handler with an injected repository; holds no
/// state of its own beyond that seam.
pub struct TasksService {
    repository: Arc<dyn TaskRepository>,
}

impl TasksService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Returns the tasks of one column, ordered by sort position
    pub async fn get_tasks(&self, status: TaskStatus) -> Result<Vec<Task>> {
        self.repository.find_by_status(status).await
    }

    /// Returns a single task by id
    pub async fn get_task(&self, id: TaskId) -> Result<Task> {
        self.repository.find_by_id(id).await
    }

    /// Assigns a task to a user and persists it
    pub async fn assign_task(&self, id: TaskId, user: &User) -> Result<Task> {
        let mut task = self.repository.find_by_id(id).await?;
        task.assign_to(user.id);
        self.repository.save(&task).await
    }

    /// Moves a task into a status column, positioned between two siblings.
    ///
    /// `previous_sibling` and `next_sibling` name the cards that should end
    /// up directly above and below the moved card; `None` on either side
    /// means the card becomes first or last. Sibling ids must resolve to
    /// existing tasks; a stale id fails the move with `TaskNotFound` and
    /// nothing is persisted.
    ///
    /// Dropping a card into the in-progress column claims it for the
    /// acting user, when one is given.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        previous_sibling: Option<TaskId>,
        next_sibling: Option<TaskId>,
        acting_user: Option<&User>,
    ) -> Result<Task> {
        let mut task = self.repository.find_by_id(task_id).await?;

        if status == TaskStatus::Done {
            // Downstream reporting picks this event up; the board itself
            // only records the transition.
            info!(task = %task_id, "task moved to done");
        }

        if status.claims_assignee() {
            if let Some(user) = acting_user {
                task.assign_to(user.id);
            }
        }

        task.set_status(status);

        let previous = match previous_sibling {
            Some(id) => Some(self.repository.find_by_id(id).await?.sort_order),
            None => None,
        };
        let next = match next_sibling {
            Some(id) => Some(self.repository.find_by_id(id).await?.sort_order),
            None => None,
        };
        task.set_sort_order(position_between(previous, next));

        debug!(
            task = %task_id,
            status = %status,
            sort_order = task.sort_order,
            "task moved"
        );
        self.repository.save(&task).await
    }

    /// Applies a normalized transport move (see [`crate::schema::MoveRequest`])
    pub async fn apply_move(&self, mv: Move, acting_user: Option<&User>) -> Result<Task> {
        self.move_task(
            mv.task_id,
            mv.status,
            mv.previous_sibling,
            mv.next_sibling,
            acting_user,
        )
        .await
    }

    /// Appends tasks to the end of a status column.
    ///
    /// Tasks are spaced a full position step apart after the column's
    /// current last card, so each seeded gap can later be subdivided by
    /// drag-and-drop moves.
    pub async fn add_tasks(&self, mut tasks: Vec<Task>, status: TaskStatus) -> Result<Vec<Task>> {
        let base = self
            .repository
            .find_last(status)
            .await?
            .map(|task| task.sort_order)
            .unwrap_or(0.0);

        let count = tasks.len();
        for (task, offset) in tasks.iter_mut().zip(step_offsets(count)) {
            task.set_status(status);
            task.set_sort_order(base + offset);
        }

        self.repository.save_all(&tasks).await?;
        Ok(tasks)
    }
}
