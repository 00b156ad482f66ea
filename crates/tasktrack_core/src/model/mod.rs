//! Domain model for tracked tasks, projects and users.
//!
//! # Responsibility
//! - Define the validated in-memory records shared by storage and services.
//! - Own field-level validation rules and derived lifecycle queries.
//!
//! # Invariants
//! - Validated constructors never yield an entity with an empty required
//!   string, out-of-range priority, or malformed email.
//! - `restore` constructors are the only path that skips validation and are
//!   reserved for rows read back from storage.
//! - Entities carry plain foreign-key ids, never back-references.
//! - Entity structs implement `Serialize` only; no deserializer can build one
//!   around validation.

pub mod project;
pub mod task;
pub mod timestamp;
pub mod user;
pub mod validation;

/// Integer primary key assigned by storage on insert.
pub type RecordId = i64;
