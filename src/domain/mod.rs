pub mod position;
pub mod sorting;
pub mod status;
pub mod task;
pub mod user;

pub use position::{position_between, step_offsets, DEFAULT_POSITION, POSITION_STEP};
pub use sorting::{sort_tasks, SortField, SortOrder};
pub use status::TaskStatus;
pub use task::{Task, TaskId};
pub use user::{User, UserId};
