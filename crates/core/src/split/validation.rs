//! Transaction and split validation.
//!
//! Two layers:
//! - [`validate_shape`] rejects malformed transactions at the boundary.
//! - [`validate_split`] checks that a well-formed split adds up.

use std::collections::HashSet;

use rust_decimal::Decimal;
use settleup_shared::types::{
    MAX_AMOUNT, TransactionId, is_cent_precise, within_split_tolerance,
};

use super::calculator::SplitCalculator;
use super::error::SplitError;
use super::types::{SplitMode, Transaction};

/// Validates the structural shape of a transaction.
///
/// # Errors
///
/// Returns the first shape violation found.
pub fn validate_shape(transaction: &Transaction) -> Result<(), SplitError> {
    if transaction.id.is_blank() {
        return Err(SplitError::MissingId);
    }
    if transaction.description.trim().is_empty() {
        return Err(SplitError::MissingDescription);
    }
    if transaction.payer.is_blank() {
        return Err(SplitError::MissingPayer);
    }
    if transaction.amount <= Decimal::ZERO {
        return Err(SplitError::NonPositiveAmount {
            amount: transaction.amount,
        });
    }
    if transaction.amount > MAX_AMOUNT {
        return Err(SplitError::AmountTooLarge {
            amount: transaction.amount,
            limit: MAX_AMOUNT,
        });
    }
    if !is_cent_precise(transaction.amount) {
        return Err(SplitError::SubCentAmount {
            amount: transaction.amount,
        });
    }
    if transaction.participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let mut seen = HashSet::with_capacity(transaction.participants.len());
    for participant in &transaction.participants {
        if !seen.insert(participant) {
            return Err(SplitError::DuplicateParticipant {
                participant: participant.clone(),
            });
        }
    }

    for detail in &transaction.split_details {
        if !seen.contains(&detail.participant) {
            return Err(SplitError::UnknownSplitParticipant {
                participant: detail.participant.clone(),
            });
        }
        if let Some(percentage) = detail.percentage
            && (percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED)
        {
            return Err(SplitError::InvalidPercentage {
                participant: detail.participant.clone(),
                percentage,
            });
        }
        if let Some(amount) = detail.amount
            && (amount < Decimal::ZERO || amount > MAX_AMOUNT || !is_cent_precise(amount))
        {
            return Err(SplitError::InvalidFixedAmount {
                participant: detail.participant.clone(),
                amount,
            });
        }
        if detail.shares == Some(0) {
            return Err(SplitError::InvalidShares {
                participant: detail.participant.clone(),
            });
        }
    }

    Ok(())
}

/// Recomputes the split and checks it against the transaction amount.
///
/// Rules:
/// - Equal splits must include the payer.
/// - Shares splits must have a non-zero share total.
/// - The computed shares must sum to the amount within 0.02.
///
/// # Errors
///
/// Returns a descriptive [`SplitError`]; nothing panics.
pub fn validate_split(transaction: &Transaction) -> Result<(), SplitError> {
    if transaction.split_mode == SplitMode::Equal && !transaction.payer_participates() {
        return Err(SplitError::PayerNotIncluded {
            payer: transaction.payer.clone(),
        });
    }

    let allocation = SplitCalculator::split_amounts(transaction);

    if transaction.split_mode == SplitMode::Shares && allocation.is_empty() {
        return Err(SplitError::ZeroTotalShares);
    }

    let actual = allocation.total();
    if !within_split_tolerance(transaction.amount, actual) {
        return Err(SplitError::SumMismatch {
            expected: transaction.amount,
            actual,
        });
    }

    Ok(())
}

/// Runs [`validate_split`] over a batch and collects every failure.
#[must_use]
pub fn validate_transactions(transactions: &[Transaction]) -> Vec<(TransactionId, SplitError)> {
    transactions
        .iter()
        .filter_map(|tx| validate_split(tx).err().map(|e| (tx.id.clone(), e)))
        .collect()
}
