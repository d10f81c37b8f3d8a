//! Shared types, errors, and configuration for SettleUp.
//!
//! This crate provides common types used across all other crates:
//! - Typed participant and transaction identifiers
//! - Money helpers with decimal precision and tolerance bands
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LimitsConfig, ServerConfig};
pub use error::{AppError, AppResult};
