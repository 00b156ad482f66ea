//! User use-case service.

use crate::model::user::{User, UserPatch};
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::user_repo::UserRepository;
use log::info;

/// Raw input for registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Unvalidated role name; must be admin, manager or developer.
    pub role: String,
}

/// Use-case service wrapper for user operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates input through `User::new` and inserts the user with a
    /// registration date of now.
    pub fn add_user(&self, input: &NewUser) -> RepoResult<RecordId> {
        let user = User::new(&input.username, &input.email, &input.role)?;
        let id = self.repo.add_user(&user)?;
        info!("event=user_add module=service status=ok user_id={id}");
        Ok(id)
    }

    pub fn get_user(&self, id: RecordId) -> RepoResult<Option<User>> {
        self.repo.get_user_by_id(id)
    }

    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.get_all_users()
    }

    /// Applies `User::update_info` to the stored user and persists only the
    /// provided fields.
    ///
    /// # Errors
    /// - `NotFound` when no user has `id`.
    /// - `Validation` when any provided field is invalid; nothing is written.
    pub fn update_user_info(
        &self,
        id: RecordId,
        username: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
    ) -> RepoResult<User> {
        let mut user = self
            .repo
            .get_user_by_id(id)?
            .ok_or(RepoError::NotFound { entity: "user", id })?;
        user.update_info(username, email, role)?;

        let patch = UserPatch {
            username: username.map(|_| user.username.clone()),
            email: email.map(|_| user.email.clone()),
            role: role.map(|_| user.role),
        };
        if self.repo.update_user_checked(id, &patch)? {
            info!("event=user_update module=service status=ok user_id={id}");
        }
        Ok(user)
    }

    /// Idempotent delete. Tasks assigned to the user keep existing with a
    /// null `assignee_id`.
    pub fn delete_user(&self, id: RecordId) -> RepoResult<bool> {
        let removed = self.repo.delete_user_counted(id)?;
        info!("event=user_delete module=service status=ok user_id={id} removed={removed}");
        Ok(true)
    }
}
