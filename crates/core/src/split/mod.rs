//! Per-transaction split calculation.
//!
//! This module implements:
//! - Transaction and split configuration types
//! - The split calculator (equal, percentage, fixed, shares)
//! - Shape and arithmetic validation
//! - Error types for split validation

pub mod calculator;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod calculator_props;

pub use calculator::SplitCalculator;
pub use error::SplitError;
pub use types::{OwedShare, SplitAllocation, SplitDetail, SplitMode, Transaction};
pub use validation::{validate_shape, validate_split, validate_transactions};
