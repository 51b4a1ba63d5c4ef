// ABOUTME: Client company database operations
// ABOUTME: Lookups by owner and id, plus client creation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{Client, NewClient};
use anyhow::Result;
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the clients table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_clients(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                company_name TEXT NOT NULL,
                industry TEXT,
                website TEXT,
                phone TEXT,
                address TEXT,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('active', 'inactive', 'pending')),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_clients_user_id ON clients(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new client owned by a user
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_client(&self, client: &NewClient) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO clients (user_id, company_name, industry, website, phone, address, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(client.user_id)
        .bind(&client.company_name)
        .bind(&client.industry)
        .bind(&client.website)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.description)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all clients owned by a user
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_clients_by_user_id(&self, user_id: i64) -> Result<Vec<Client>> {
        let rows = match sqlx::query(
            r"
            SELECT id, user_id, company_name, industry, website, phone, address,
                   description, status, created_at, updated_at
            FROM clients WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Client listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_client).collect()
    }

    /// Get a client by id
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to `None`
    pub async fn get_client_by_id(&self, id: i64) -> Result<Option<Client>> {
        let row = match sqlx::query(
            r"
            SELECT id, user_id, company_name, industry, website, phone, address,
                   description, status, created_at, updated_at
            FROM clients WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(row) => row,
            Err(e) => {
                warn!("Client lookup unavailable: {e}");
                return Ok(None);
            }
        };

        row.as_ref().map(Self::row_to_client).transpose()
    }

    fn row_to_client(row: &sqlx::sqlite::SqliteRow) -> Result<Client> {
        let status: String = row.get("status");

        Ok(Client {
            id: row.get("id"),
            user_id: row.get("user_id"),
            company_name: row.get("company_name"),
            industry: row.get("industry"),
            website: row.get("website"),
            phone: row.get("phone"),
            address: row.get("address"),
            description: row.get("description"),
            status: status.parse()?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
