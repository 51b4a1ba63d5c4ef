// ABOUTME: Utility module grouping for shared helpers
// ABOUTME: Authorization-header and cookie parsing helpers live here
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Utility functions and helpers

/// Bearer-token extraction from Authorization headers
pub mod auth;

/// Session cookie parsing and construction
pub mod cookies;
