//! Core settlement logic for SettleUp.
//!
//! This crate contains pure computation with ZERO web or I/O dependencies.
//! Callers pass transactions in and get balances and settlements out; no
//! state is kept between calls.
//!
//! # Modules
//!
//! - `split` - Per-transaction split calculation and validation
//! - `balance` - Net balance aggregation across transactions
//! - `settlement` - Settlement optimization and verification

pub mod balance;
pub mod settlement;
pub mod split;

#[cfg(test)]
mod testing;
