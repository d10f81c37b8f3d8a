//! Settlement verification.
//!
//! Applies every settlement to a copy of the balances: paying credits the
//! payer's balance (`from`) and debits the receiver's (`to`), so a correct
//! plan drives everything to within 0.01 of zero.

use std::collections::HashMap;

use rust_decimal::Decimal;
use settleup_shared::types::{ParticipantId, SETTLED_TOLERANCE};

use super::error::SettlementError;
use super::types::Settlement;
use crate::balance::Balance;

/// Balances left after applying settlements, in first-seen order.
fn residuals(
    balances: &[Balance],
    settlements: &[Settlement],
) -> Result<Vec<(ParticipantId, Decimal)>, SettlementError> {
    let mut order: Vec<ParticipantId> = Vec::new();
    let mut working: HashMap<ParticipantId, Decimal> = HashMap::new();

    let mut apply = |participant: &ParticipantId, delta: Decimal| -> Result<(), SettlementError> {
        let entry = working.entry(participant.clone()).or_insert_with(|| {
            order.push(participant.clone());
            Decimal::ZERO
        });
        *entry = entry
            .checked_add(delta)
            .ok_or_else(|| SettlementError::AmountOverflow {
                participant: participant.clone(),
            })?;
        Ok(())
    };

    for balance in balances {
        apply(&balance.participant, balance.amount)?;
    }
    for settlement in settlements {
        apply(&settlement.from, settlement.amount)?;
        apply(&settlement.to, -settlement.amount)?;
    }

    Ok(order
        .into_iter()
        .map(|p| {
            let residual = working.get(&p).copied().unwrap_or_default();
            (p, residual)
        })
        .collect())
}

/// Returns true if the settlements resolve every balance to within 0.01.
///
/// Informational: `false` means an optimizer bug or balances that did not
/// sum to zero in the first place.
#[must_use]
pub fn validate_settlements(balances: &[Balance], settlements: &[Settlement]) -> bool {
    check_settlements(balances, settlements).is_ok()
}

/// Like [`validate_settlements`], naming the first unresolved participant.
///
/// # Errors
///
/// Returns [`SettlementError::Unresolved`] for the first participant whose
/// residual exceeds 0.01, or [`SettlementError::AmountOverflow`] if the
/// amounts are too large to add up.
pub fn check_settlements(
    balances: &[Balance],
    settlements: &[Settlement],
) -> Result<(), SettlementError> {
    match residuals(balances, settlements)?
        .into_iter()
        .find(|(_, residual)| residual.abs() > SETTLED_TOLERANCE)
    {
        Some((participant, residual)) => Err(SettlementError::Unresolved {
            participant,
            residual,
        }),
        None => Ok(()),
    }
}
