// ABOUTME: Messages exchanged between a client and the agency
// ABOUTME: Message struct, sender-type enum, and insert payload
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Which side of the conversation sent a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Client,
    Agency,
}

impl SenderType {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Agency => "agency",
        }
    }
}

impl Display for SenderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SenderType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "agency" => Ok(Self::Agency),
            _ => Err(AppError::invalid_input(format!("Invalid sender type: {s}"))),
        }
    }
}

/// A message in a client's conversation thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub client_id: i64,
    /// User id of the sender (client owner or agency staff)
    pub sender_id: i64,
    pub sender_type: SenderType,
    pub subject: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub client_id: i64,
    pub sender_id: i64,
    pub sender_type: SenderType,
    pub subject: Option<String>,
    pub content: String,
}
