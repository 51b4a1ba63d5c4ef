// ABOUTME: Common data models mirroring the portal's relational schema
// ABOUTME: Entity structs, insert payloads, and status enums with database string forms
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Data models for portal entities

/// Budget-request entities
pub mod budget;
/// Client company entities
pub mod client;
/// Agency-curated content (portfolio, services)
pub mod content;
/// Inbound contact inquiries
pub mod contact;
/// Client/agency message entities
pub mod message;
/// Client performance reports
pub mod report;
/// User accounts bound to external identities
pub mod user;

pub use budget::{Budget, BudgetStatus, NewBudget};
pub use client::{Client, ClientStatus, NewClient};
pub use contact::{Contact, ContactStatus, NewContact};
pub use content::{NewPortfolioItem, NewService, PortfolioItem, Service};
pub use message::{Message, NewMessage, SenderType};
pub use report::{NewReport, Report};
pub use user::{UpsertUser, User, UserRole};
