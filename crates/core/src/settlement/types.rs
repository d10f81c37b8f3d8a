//! Settlement domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use settleup_shared::types::ParticipantId;

use crate::balance::Balance;

/// A directed payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Debtor who pays.
    pub from: ParticipantId,
    /// Creditor who receives.
    pub to: ParticipantId,
    /// Positive amount.
    pub amount: Decimal,
}

impl Settlement {
    /// Creates a settlement.
    #[must_use]
    pub fn new(
        from: impl Into<ParticipantId>,
        to: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// One step of the creditor/debtor matching walk, kept for debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStep {
    /// Creditor under the cursor.
    pub creditor: ParticipantId,
    /// Debtor under the cursor.
    pub debtor: ParticipantId,
    /// Creditor's remaining amount before the step.
    pub creditor_remaining: Decimal,
    /// Debtor's remaining magnitude before the step.
    pub debtor_remaining: Decimal,
    /// Amount matched (rounded to cents).
    pub transfer: Decimal,
    /// False if the transfer was below tolerance and suppressed.
    pub emitted: bool,
}

/// Settlements plus the matching steps that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationTrace {
    /// Resulting settlements.
    pub settlements: Vec<Settlement>,
    /// Matching steps, in order.
    pub steps: Vec<MatchStep>,
}

/// Result of a full settlement computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    /// Net balances, sorted descending.
    pub balances: Vec<Balance>,
    /// Transfers resolving the balances.
    pub settlements: Vec<Settlement>,
    /// Number of input transactions.
    pub total_transactions: usize,
    /// Sum of all transaction amounts.
    pub total_amount: Decimal,
    /// Number of settlements.
    pub optimized_transaction_count: usize,
}
