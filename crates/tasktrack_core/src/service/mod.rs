//! Tracker use-case services.
//!
//! # Responsibility
//! - Turn raw presentation input into validated entities.
//! - Keep presentation layers decoupled from storage details.
//!
//! # Invariants
//! - Mutations go through repository `*_checked` updates only.

pub mod project_service;
pub mod task_service;
pub mod user_service;
