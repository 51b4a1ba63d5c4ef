// ABOUTME: User management database operations
// ABOUTME: Handles the merge-on-login upsert and user lookups
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{UpsertUser, User};
use anyhow::Result;
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                open_id TEXT UNIQUE NOT NULL,
                name TEXT,
                email TEXT,
                login_method TEXT,
                role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin', 'client')),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                last_signed_in DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_open_id ON users(open_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create or merge a user keyed by external identity
    ///
    /// Only fields supplied in `user` overwrite the stored row; absent
    /// fields are left untouched. `last_signed_in` is always refreshed.
    /// The role is auto-elevated to admin only when the identity matches
    /// `owner_open_id` and no explicit role was supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn upsert_user(&self, user: &UpsertUser, owner_open_id: Option<&str>) -> Result<()> {
        anyhow::ensure!(!user.open_id.is_empty(), "User open_id is required for upsert");

        let effective_role: Option<&str> = match user.role {
            Some(role) => Some(role.as_str()),
            None => match owner_open_id {
                Some(owner) if owner == user.open_id => Some("admin"),
                _ => None,
            },
        };

        sqlx::query(
            r"
            INSERT INTO users (open_id, name, email, login_method, role, last_signed_in)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'user'), COALESCE($6, CURRENT_TIMESTAMP))
            ON CONFLICT(open_id) DO UPDATE SET
                name = COALESCE(excluded.name, name),
                email = COALESCE(excluded.email, email),
                login_method = COALESCE(excluded.login_method, login_method),
                role = COALESCE($5, role),
                last_signed_in = excluded.last_signed_in,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(&user.open_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.login_method)
        .bind(effective_role)
        .bind(user.last_signed_in)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a user by external identity
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to `None`
    pub async fn get_user_by_open_id(&self, open_id: &str) -> Result<Option<User>> {
        self.get_user_impl("open_id", open_id).await
    }

    /// Get a user by surrogate id
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to `None`
    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row = match sqlx::query(
            r"
            SELECT id, open_id, name, email, login_method, role,
                   created_at, updated_at, last_signed_in
            FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(row) => row,
            Err(e) => {
                warn!("User lookup unavailable: {e}");
                return Ok(None);
            }
        };

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_user_impl(&self, field: &str, value: &str) -> Result<Option<User>> {
        let query = format!(
            r"
            SELECT id, open_id, name, email, login_method, role,
                   created_at, updated_at, last_signed_in
            FROM users WHERE {field} = $1
            "
        );

        let row = match sqlx::query(&query).bind(value).fetch_optional(&self.pool).await {
            Ok(row) => row,
            Err(e) => {
                warn!("User lookup unavailable: {e}");
                return Ok(None);
            }
        };

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Convert a database row to a `User` struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let role: String = row.get("role");

        Ok(User {
            id: row.get("id"),
            open_id: row.get("open_id"),
            name: row.get("name"),
            email: row.get("email"),
            login_method: row.get("login_method"),
            role: role.parse()?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            last_signed_in: row.get("last_signed_in"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{UpsertUser, UserRole};

    #[tokio::test]
    async fn test_upsert_creates_then_merges() {
        let db = create_test_db().await.unwrap();

        let mut first = UpsertUser::new("oid-1");
        first.name = Some("Ada".into());
        first.email = Some("ada@example.com".into());
        db.upsert_user(&first, None).await.unwrap();

        // Second login supplies only a new name; email must survive
        let mut second = UpsertUser::new("oid-1");
        second.name = Some("Ada L.".into());
        db.upsert_user(&second, None).await.unwrap();

        let user = db.get_user_by_open_id("oid-1").await.unwrap().unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada L."));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_owner_identity_elevated_without_explicit_role() {
        let db = create_test_db().await.unwrap();

        db.upsert_user(&UpsertUser::new("owner-oid"), Some("owner-oid"))
            .await
            .unwrap();
        let user = db.get_user_by_open_id("owner-oid").await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Admin);

        // An explicit role wins over the bootstrap rule
        let mut explicit = UpsertUser::new("owner-oid");
        explicit.role = Some(UserRole::Client);
        db.upsert_user(&explicit, Some("owner-oid")).await.unwrap();
        let user = db.get_user_by_open_id("owner-oid").await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Client);
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let db = create_test_db().await.unwrap();
        assert!(db.get_user_by_open_id("nobody").await.unwrap().is_none());
        assert!(db.get_user(42).await.unwrap().is_none());
    }
}
