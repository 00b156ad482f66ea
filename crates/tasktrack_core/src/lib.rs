//! Core domain and persistence logic for the task/project/user tracker.
//! This crate is the single source of truth for field validation rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectPatch, ProjectStatus};
pub use model::task::{Priority, Task, TaskPatch, TaskStatus};
pub use model::timestamp::{format_timestamp, parse_timestamp, Timestamp};
pub use model::user::{Role, User, UserPatch};
pub use model::validation::ValidationError;
pub use model::RecordId;
pub use repo::error::{RepoError, RepoResult};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use service::project_service::{NewProject, ProjectProgress, ProjectService};
pub use service::task_service::{NewTask, TaskService, TaskTableRow};
pub use service::user_service::{NewUser, UserService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
