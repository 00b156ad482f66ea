//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts for tasks, projects and users.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Inserts call the entity's `validate()` before SQL mutations.
//! - `update_*` writes patch values unchecked; `update_*_checked` validates
//!   and trims the patch first. Services only use the checked variant.
//! - `delete_*` is idempotent and reports success for missing ids;
//!   `delete_*_counted` exposes the number of rows removed.
//! - Reads rebuild entities through trusted `restore` constructors and
//!   reject rows that cannot be decoded at all.
//! - Every statement autocommits; no transaction spans entities.

pub mod error;
pub mod project_repo;
mod sql;
pub mod task_repo;
pub mod user_repo;
