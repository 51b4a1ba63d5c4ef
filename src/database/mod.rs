// ABOUTME: Database management and connection pooling for the portal schema
// ABOUTME: Owns migrations and groups per-entity query modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! # Database Management
//!
//! This module provides the data-access layer for the portal server.
//! The `Database` handle is constructed explicitly at startup and injected
//! through `ServerResources`; there is no lazy global connection state.
//!
//! Contract: read functions never fail for "not found" (they return `None`
//! or an empty `Vec`), and degrade to an empty result with a warning when
//! the database is unavailable. Write functions fail hard. Each call is a
//! single statement against a single table.

mod budgets;
mod clients;
mod contacts;
mod content;
mod messages;
mod reports;
mod users;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for portal entity storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close the underlying pool. Subsequent reads degrade to empty
    /// results; subsequent writes fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_clients().await?;
        self.migrate_contacts().await?;
        self.migrate_budgets().await?;
        self.migrate_messages().await?;
        self.migrate_reports().await?;
        self.migrate_content().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) async fn create_test_db() -> Result<Database> {
        // In-memory database - each connection gets its own isolated instance
        Database::new("sqlite::memory:").await
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = create_test_db().await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
    }
}
