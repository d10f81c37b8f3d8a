//! Settlement optimization and verification.
//!
//! This module implements:
//! - Greedy largest-first settlement matching
//! - Settlement verification against balances
//! - The end-to-end settlement service
//! - Error types for settlement computation

pub mod error;
pub mod optimizer;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use error::SettlementError;
pub use optimizer::SettlementOptimizer;
pub use service::SettlementService;
pub use types::{MatchStep, OptimizationTrace, Settlement, SettlementReport};
pub use validation::{check_settlements, validate_settlements};
