//! User domain model.
//!
//! # Invariants
//! - `username` is non-empty after trim.
//! - `email` matches the accepted address shape.
//! - `registration_date` is fixed at construction and has no setter.

use crate::model::timestamp::{format_timestamp, now, Timestamp};
use crate::model::validation::{normalize_email, require_non_empty, ValidationError};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Access role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Developer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Developer];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Developer => "developer",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == trimmed)
            .ok_or_else(|| ValidationError::InvalidRole(trimmed.to_string()))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered person who can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<RecordId>,
    pub username: String,
    pub email: String,
    pub role: Role,
    registration_date: Timestamp,
}

impl User {
    /// Creates a user registered at local now.
    ///
    /// # Errors
    /// - `EmptyField` when `username` is blank.
    /// - `InvalidRole` when `role` is not admin|manager|developer.
    /// - `InvalidEmail` when `email` does not match the address shape.
    pub fn new(username: &str, email: &str, role: &str) -> Result<Self, ValidationError> {
        let username = require_non_empty("username", username)?;
        let role = role.parse()?;
        let email = normalize_email(email)?;
        Ok(Self {
            id: None,
            username,
            email,
            role,
            registration_date: now(),
        })
    }

    /// Rebuilds a user from stored values without validation.
    pub fn restore(
        id: RecordId,
        username: String,
        email: String,
        role: Role,
        registration_date: Timestamp,
    ) -> Self {
        Self {
            id: Some(id),
            username,
            email,
            role,
            registration_date,
        }
    }

    pub fn registration_date(&self) -> Timestamp {
        self.registration_date
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("username", &self.username)?;
        normalize_email(&self.email)?;
        Ok(())
    }

    /// Replaces any provided profile fields.
    ///
    /// Every provided value is validated before anything is applied, so a
    /// failed call leaves the user unchanged.
    pub fn update_info(
        &mut self,
        username: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
    ) -> Result<(), ValidationError> {
        let username = username
            .map(|value| require_non_empty("username", value))
            .transpose()?;
        let email = email.map(normalize_email).transpose()?;
        let role = role.map(str::parse::<Role>).transpose()?;

        if let Some(username) = username {
            self.username = username;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(role) = role {
            self.role = role;
        }
        Ok(())
    }

    pub fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "role": self.role.as_str(),
            "registration_date": format_timestamp(&self.registration_date),
        })
    }
}

/// Column-wise partial update for a stored user. Registration date is not
/// patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }

    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            username: self
                .username
                .as_deref()
                .map(|username| require_non_empty("username", username))
                .transpose()?,
            email: self.email.as_deref().map(normalize_email).transpose()?,
            role: self.role,
        })
    }
}
