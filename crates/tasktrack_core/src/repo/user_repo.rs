//! User repository contract and SQLite implementation.

use crate::model::timestamp::format_timestamp;
use crate::model::user::{Role, User, UserPatch};
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sql::{parse_stored_timestamp, text_value, ColumnUpdates};
use rusqlite::{params, Connection, Params, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    role,
    registration_date
FROM users";

/// Repository interface for user operations.
pub trait UserRepository {
    fn add_user(&self, user: &User) -> RepoResult<RecordId>;
    fn get_user_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;
    fn get_all_users(&self) -> RepoResult<Vec<User>>;
    /// Unchecked column update. A malformed email in the patch is written
    /// as-is.
    fn update_user(&self, id: RecordId, patch: &UserPatch) -> RepoResult<bool>;
    /// Deleting a user nulls `assignee_id` on their tasks.
    fn delete_user_counted(&self, id: RecordId) -> RepoResult<usize>;

    fn update_user_checked(&self, id: RecordId, patch: &UserPatch) -> RepoResult<bool> {
        let patch = patch.normalized()?;
        self.update_user(id, &patch)
    }

    fn delete_user(&self, id: RecordId) -> RepoResult<bool> {
        self.delete_user_counted(id)?;
        Ok(true)
    }
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_users<P: Params>(&self, filter_sql: &str, params: P) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} {filter_sql} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn add_user(&self, user: &User) -> RepoResult<RecordId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (
                username,
                email,
                role,
                registration_date
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.username.as_str(),
                user.email.as_str(),
                user.role.as_str(),
                format_timestamp(&user.registration_date()),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_user_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let mut users = self.query_users("WHERE id = ?1", [id])?;
        Ok(users.pop())
    }

    fn get_all_users(&self) -> RepoResult<Vec<User>> {
        self.query_users("", [])
    }

    fn update_user(&self, id: RecordId, patch: &UserPatch) -> RepoResult<bool> {
        let mut updates = ColumnUpdates::default();
        if let Some(username) = patch.username.as_deref() {
            updates.set("username", text_value(username));
        }
        if let Some(email) = patch.email.as_deref() {
            updates.set("email", text_value(email));
        }
        if let Some(role) = patch.role {
            updates.set("role", text_value(role.as_str()));
        }

        if updates.is_empty() {
            return Ok(false);
        }
        updates.execute(self.conn, "users", id)?;
        Ok(true)
    }

    fn delete_user_counted(&self, id: RecordId) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM users WHERE id = ?1;", [id])?)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let role_text: String = row.get("role")?;
    let role = role_text.parse::<Role>().map_err(|_| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    let registration_date =
        parse_stored_timestamp("users.registration_date", row.get("registration_date")?)?
            .ok_or_else(|| {
                RepoError::InvalidData("missing value in users.registration_date".to_string())
            })?;

    Ok(User::restore(
        row.get("id")?,
        row.get("username")?,
        row.get("email")?,
        role,
        registration_date,
    ))
}
