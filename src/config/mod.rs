// ABOUTME: Configuration module grouping for the portal server
// ABOUTME: Environment-driven configuration lives in the environment submodule
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Configuration management

/// Environment-based configuration loading
pub mod environment;
