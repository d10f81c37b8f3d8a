//! Split error types.
//!
//! Shape errors describe malformed transactions that the boundary rejects.
//! Arithmetic errors describe splits that do not add up; they are returned
//! as values so callers can decide whether to block or warn.

use rust_decimal::Decimal;
use serde::Serialize;
use settleup_shared::types::ParticipantId;
use thiserror::Error;

/// Errors found while validating a transaction or its split.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitError {
    // ========== Shape Errors ==========
    /// Transaction identifier is blank.
    #[error("Transaction id is required")]
    MissingId,

    /// Description is blank.
    #[error("Description is required")]
    MissingDescription,

    /// Payer is blank.
    #[error("Payer is required")]
    MissingPayer,

    /// Amount is zero or negative.
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// Amount above the largest amount the engine accepts.
    #[error("Amount {amount} exceeds the maximum of {limit}")]
    AmountTooLarge {
        /// The offending amount.
        amount: Decimal,
        /// Largest accepted amount.
        limit: Decimal,
    },

    /// Amount finer than one cent.
    #[error("Amount {amount} has more than two decimal places")]
    SubCentAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// Participant set is empty.
    #[error("At least one participant is required")]
    NoParticipants,

    /// A participant is listed more than once.
    #[error("Participant {participant} is listed more than once")]
    DuplicateParticipant {
        /// The repeated participant.
        participant: ParticipantId,
    },

    /// A split detail names someone outside the participant set.
    #[error("Split detail references {participant}, who is not a participant")]
    UnknownSplitParticipant {
        /// The unknown participant.
        participant: ParticipantId,
    },

    /// Percentage outside 0-100.
    #[error("Percentage for {participant} must be between 0 and 100, got {percentage}")]
    InvalidPercentage {
        /// The participant.
        participant: ParticipantId,
        /// The offending percentage.
        percentage: Decimal,
    },

    /// Share count of zero.
    #[error("Share count for {participant} must be positive")]
    InvalidShares {
        /// The participant.
        participant: ParticipantId,
    },

    /// Fixed amount that is negative, too large or finer than one cent.
    #[error("Fixed amount for {participant} is invalid: {amount}")]
    InvalidFixedAmount {
        /// The participant.
        participant: ParticipantId,
        /// The offending amount.
        amount: Decimal,
    },

    // ========== Arithmetic Errors ==========
    /// Equal split where the payer does not share the expense.
    #[error("Payer {payer} must be included in an equal split")]
    PayerNotIncluded {
        /// The payer.
        payer: ParticipantId,
    },

    /// Shares mode with no shares at all.
    #[error("Total shares is zero; nothing can be allocated")]
    ZeroTotalShares,

    /// Computed shares do not add up to the transaction amount.
    #[error("Split total {actual} does not match amount {expected}")]
    SumMismatch {
        /// Transaction amount.
        expected: Decimal,
        /// Sum of computed shares.
        actual: Decimal,
    },
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingId => "MISSING_ID",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::MissingPayer => "MISSING_PAYER",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::SubCentAmount { .. } => "SUB_CENT_AMOUNT",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::DuplicateParticipant { .. } => "DUPLICATE_PARTICIPANT",
            Self::UnknownSplitParticipant { .. } => "UNKNOWN_SPLIT_PARTICIPANT",
            Self::InvalidPercentage { .. } => "INVALID_PERCENTAGE",
            Self::InvalidShares { .. } => "INVALID_SHARES",
            Self::InvalidFixedAmount { .. } => "INVALID_FIXED_AMOUNT",
            Self::PayerNotIncluded { .. } => "PAYER_NOT_INCLUDED",
            Self::ZeroTotalShares => "ZERO_TOTAL_SHARES",
            Self::SumMismatch { .. } => "SPLIT_SUM_MISMATCH",
        }
    }
}
