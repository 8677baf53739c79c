//! # Taskboard Core
//!
//! Core business logic and domain models for kanban task tracking.
//!
//! This crate provides the fundamental types and operations for managing
//! board columns, task cards, and drag-and-drop ordering without any
//! dependency on specific UI implementations or storage backends.
//!
//! Card ordering uses fractional positioning: moving a card computes a
//! new sort position from its intended neighbors (see
//! [`domain::position`]), so no other card ever needs renumbering.

pub mod domain;
pub mod error;
pub mod repository;
pub mod schema;
pub mod service;

// Re-export commonly used types
pub use domain::{
    position::{position_between, DEFAULT_POSITION, POSITION_STEP},
    status::TaskStatus,
    task::{Task, TaskId},
    user::{User, UserId},
};
pub use error::{Result, TaskboardError};
pub use repository::{BackendConfig, TaskRepository};
pub use schema::{Move, MoveRequest};
pub use service::TasksService;
