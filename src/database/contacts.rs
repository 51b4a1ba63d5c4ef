// ABOUTME: Contact inquiry database operations
// ABOUTME: Public insert path plus admin-only listing and status triage
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{Contact, ContactStatus, NewContact};
use anyhow::Result;
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the contacts table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_contacts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                company TEXT,
                message TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'new' CHECK (status IN ('new', 'read', 'responded')),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                responded_at DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a contact submission
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_contact(&self, contact: &NewContact) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO contacts (name, email, phone, company, message)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.company)
        .bind(&contact.message)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all contact inquiries, newest first
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_all_contacts(&self) -> Result<Vec<Contact>> {
        let rows = match sqlx::query(
            r"
            SELECT id, name, email, phone, company, message, status, created_at, responded_at
            FROM contacts ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Contact listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_contact).collect()
    }

    /// Get a contact inquiry by id
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to `None`
    pub async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>> {
        let row = match sqlx::query(
            r"
            SELECT id, name, email, phone, company, message, status, created_at, responded_at
            FROM contacts WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(row) => row,
            Err(e) => {
                warn!("Contact lookup unavailable: {e}");
                return Ok(None);
            }
        };

        row.as_ref().map(Self::row_to_contact).transpose()
    }

    /// Update the triage status of a contact inquiry. Moving to
    /// `responded` stamps `responded_at` in the same statement.
    ///
    /// Returns whether a row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn update_contact_status(&self, id: i64, status: ContactStatus) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE contacts SET
                status = $2,
                responded_at = CASE WHEN $2 = 'responded' THEN CURRENT_TIMESTAMP
                                    ELSE responded_at END
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_contact(row: &sqlx::sqlite::SqliteRow) -> Result<Contact> {
        let status: String = row.get("status");

        Ok(Contact {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            company: row.get("company"),
            message: row.get("message"),
            status: status.parse()?,
            created_at: row.get("created_at"),
            responded_at: row.get("responded_at"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{ContactStatus, NewContact};

    fn sample_contact(name: &str) -> NewContact {
        NewContact {
            name: name.into(),
            email: format!("{name}@example.com"),
            phone: None,
            company: None,
            message: "We would like a new campaign".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_triage_contact() {
        let db = create_test_db().await.unwrap();
        let id = db.create_contact(&sample_contact("jo")).await.unwrap();

        let contact = db.get_contact_by_id(id).await.unwrap().unwrap();
        assert_eq!(contact.status, ContactStatus::New);
        assert!(contact.responded_at.is_none());

        assert!(db.update_contact_status(id, ContactStatus::Read).await.unwrap());
        let contact = db.get_contact_by_id(id).await.unwrap().unwrap();
        assert_eq!(contact.status, ContactStatus::Read);
        assert!(contact.responded_at.is_none());

        assert!(db
            .update_contact_status(id, ContactStatus::Responded)
            .await
            .unwrap());
        let contact = db.get_contact_by_id(id).await.unwrap().unwrap();
        assert_eq!(contact.status, ContactStatus::Responded);
        assert!(contact.responded_at.is_some());
    }

    #[tokio::test]
    async fn test_update_unknown_contact_reports_no_rows() {
        let db = create_test_db().await.unwrap();
        assert!(!db.update_contact_status(7, ContactStatus::Read).await.unwrap());
    }
}
