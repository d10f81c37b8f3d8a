//! End-to-end settlement computation.

use std::collections::HashSet;

use rust_decimal::Decimal;
use settleup_shared::LimitsConfig;
use settleup_shared::types::{ParticipantId, round_money};

use super::error::SettlementError;
use super::optimizer::SettlementOptimizer;
use super::types::SettlementReport;
use crate::balance::BalanceAggregator;
use crate::split::{Transaction, validate_shape};

/// Settlement service.
pub struct SettlementService;

impl SettlementService {
    /// Aggregates balances, optimizes settlements, and reports totals.
    ///
    /// Assumes the transactions are already well-formed; use
    /// [`compute_checked`](Self::compute_checked) for untrusted input.
    #[must_use]
    pub fn compute_settlement(
        transactions: &[Transaction],
        known_participants: Option<&[ParticipantId]>,
    ) -> SettlementReport {
        let balances = BalanceAggregator::compute_balances(transactions, known_participants);
        let settlements = SettlementOptimizer::optimize(&balances);
        let total_amount = round_money(transactions.iter().map(|t| t.amount).sum::<Decimal>());

        SettlementReport {
            total_transactions: transactions.len(),
            total_amount,
            optimized_transaction_count: settlements.len(),
            balances,
            settlements,
        }
    }

    /// Validates shape and request limits, then computes the settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is exceeded or any transaction is
    /// malformed. Split arithmetic mismatches are not errors here; see
    /// [`validate_transactions`](crate::split::validate_transactions).
    pub fn compute_checked(
        transactions: &[Transaction],
        known_participants: Option<&[ParticipantId]>,
        limits: &LimitsConfig,
    ) -> Result<SettlementReport, SettlementError> {
        if transactions.len() > limits.max_transactions {
            return Err(SettlementError::TooManyTransactions {
                limit: limits.max_transactions,
                actual: transactions.len(),
            });
        }

        for tx in transactions {
            validate_shape(tx).map_err(|source| SettlementError::InvalidTransaction {
                transaction: tx.id.clone(),
                source,
            })?;
        }

        let participants = Self::distinct_participants(transactions, known_participants);
        if participants > limits.max_participants {
            return Err(SettlementError::TooManyParticipants {
                limit: limits.max_participants,
                actual: participants,
            });
        }

        Ok(Self::compute_settlement(transactions, known_participants))
    }

    fn distinct_participants(
        transactions: &[Transaction],
        known_participants: Option<&[ParticipantId]>,
    ) -> usize {
        let mut seen: HashSet<&ParticipantId> = HashSet::new();
        seen.extend(known_participants.unwrap_or_default());
        for tx in transactions {
            seen.insert(&tx.payer);
            seen.extend(&tx.participants);
        }
        seen.len()
    }
}
