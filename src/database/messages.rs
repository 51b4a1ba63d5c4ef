// ABOUTME: Message thread database operations
// ABOUTME: Per-client message listing and insertion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{Message, NewMessage};
use anyhow::Result;
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the messages table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_messages(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id INTEGER NOT NULL REFERENCES clients(id),
                sender_id INTEGER NOT NULL,
                sender_type TEXT NOT NULL CHECK (sender_type IN ('client', 'agency')),
                subject TEXT,
                content TEXT NOT NULL,
                is_read BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_client_id ON messages(client_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a message into a client's thread
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_message(&self, message: &NewMessage) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO messages (client_id, sender_id, sender_type, subject, content)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(message.client_id)
        .bind(message.sender_id)
        .bind(message.sender_type.as_str())
        .bind(&message.subject)
        .bind(&message.content)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List a client's messages, newest first
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_messages_by_client_id(&self, client_id: i64) -> Result<Vec<Message>> {
        let rows = match sqlx::query(
            r"
            SELECT id, client_id, sender_id, sender_type, subject, content, is_read, created_at
            FROM messages WHERE client_id = $1 ORDER BY created_at DESC
            ",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Message listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_message).collect()
    }

    fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<Message> {
        let sender_type: String = row.get("sender_type");

        Ok(Message {
            id: row.get("id"),
            client_id: row.get("client_id"),
            sender_id: row.get("sender_id"),
            sender_type: sender_type.parse()?,
            subject: row.get("subject"),
            content: row.get("content"),
            is_read: row.get("is_read"),
            created_at: row.get("created_at"),
        })
    }
}
