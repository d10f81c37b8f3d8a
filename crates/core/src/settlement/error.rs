//! Settlement error types.

use rust_decimal::Decimal;
use settleup_shared::AppError;
use settleup_shared::types::{ParticipantId, TransactionId};
use thiserror::Error;

use crate::split::SplitError;

/// Errors raised around a settlement computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// A transaction failed boundary validation.
    #[error("Transaction {transaction} is invalid: {source}")]
    InvalidTransaction {
        /// The offending transaction.
        transaction: TransactionId,
        /// What was wrong with it.
        #[source]
        source: SplitError,
    },

    /// Too many transactions in one request.
    #[error("Too many transactions: {actual} exceeds limit of {limit}")]
    TooManyTransactions {
        /// Configured limit.
        limit: usize,
        /// Transactions supplied.
        actual: usize,
    },

    /// Too many distinct participants in one request.
    #[error("Too many participants: {actual} exceeds limit of {limit}")]
    TooManyParticipants {
        /// Configured limit.
        limit: usize,
        /// Participants found.
        actual: usize,
    },

    /// Amounts too large to add up without overflowing.
    #[error("Amounts for {participant} are too large to add up")]
    AmountOverflow {
        /// Participant whose running total overflowed.
        participant: ParticipantId,
    },

    /// Applying the settlements leaves a participant unresolved.
    #[error("Participant {participant} is left with {residual} after settlement")]
    Unresolved {
        /// The participant.
        participant: ParticipantId,
        /// Balance remaining after all settlements are applied.
        residual: Decimal,
    },
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransaction { .. } => "INVALID_TRANSACTION",
            Self::TooManyTransactions { .. } => "TOO_MANY_TRANSACTIONS",
            Self::TooManyParticipants { .. } => "TOO_MANY_PARTICIPANTS",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            Self::Unresolved { .. } => "UNRESOLVED_BALANCE",
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::InvalidTransaction { .. } | SettlementError::AmountOverflow { .. } => {
                Self::Validation(err.to_string())
            }
            SettlementError::TooManyTransactions { .. }
            | SettlementError::TooManyParticipants { .. } => Self::LimitExceeded(err.to_string()),
            SettlementError::Unresolved { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}
