//! Settlement minimization using greedy largest-first matching.
//!
//! This is a heuristic, not an exact minimizer (minimum-transfer settlement
//! is NP-hard in general). It guarantees at most `n - 1` transfers for `n`
//! non-zero balances and is optimal or close to it in practice:
//!
//! 1. Partition into creditors (> 0.01) and debtors (< -0.01, as magnitude).
//! 2. Stable sort both descending.
//! 3. Match the current largest creditor with the current largest debtor,
//!    transfer the smaller remaining amount, advance exhausted cursors.
//! 4. Stop when either side runs out; sub-cent residuals are dropped.

use rust_decimal::Decimal;
use settleup_shared::types::{ParticipantId, SETTLED_TOLERANCE, round_money};

use super::types::{MatchStep, OptimizationTrace, Settlement};
use crate::balance::Balance;

/// Working copy of one side of the match.
#[derive(Debug)]
struct Party {
    participant: ParticipantId,
    remaining: Decimal,
}

/// Settlement optimizer.
pub struct SettlementOptimizer;

impl SettlementOptimizer {
    /// Produces transfers that resolve every balance to zero.
    ///
    /// Pure: the input is never mutated. Deterministic for a given input
    /// order; ties keep input order.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use settleup_core::balance::Balance;
    /// use settleup_core::settlement::{Settlement, SettlementOptimizer};
    ///
    /// let balances = vec![
    ///     Balance::new("A", dec!(200)),
    ///     Balance::new("B", dec!(-150)),
    ///     Balance::new("C", dec!(-50)),
    /// ];
    /// assert_eq!(
    ///     SettlementOptimizer::optimize(&balances),
    ///     vec![Settlement::new("B", "A", dec!(150)), Settlement::new("C", "A", dec!(50))]
    /// );
    /// ```
    #[must_use]
    pub fn optimize(balances: &[Balance]) -> Vec<Settlement> {
        Self::optimize_with_trace(balances).settlements
    }

    /// Same as [`optimize`](Self::optimize), also returning every matching
    /// step.
    #[must_use]
    pub fn optimize_with_trace(balances: &[Balance]) -> OptimizationTrace {
        let (mut creditors, mut debtors) = Self::partition(balances);
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut trace = OptimizationTrace::default();
        let (mut i, mut j) = (0, 0);

        while i < creditors.len() && j < debtors.len() {
            let creditor = &mut creditors[i];
            let debtor = &mut debtors[j];

            let transfer = round_money(creditor.remaining.min(debtor.remaining));
            let emitted = transfer > SETTLED_TOLERANCE;

            trace.steps.push(MatchStep {
                creditor: creditor.participant.clone(),
                debtor: debtor.participant.clone(),
                creditor_remaining: creditor.remaining,
                debtor_remaining: debtor.remaining,
                transfer,
                emitted,
            });
            if emitted {
                trace.settlements.push(Settlement {
                    from: debtor.participant.clone(),
                    to: creditor.participant.clone(),
                    amount: transfer,
                });
            }

            creditor.remaining -= transfer;
            debtor.remaining -= transfer;

            if creditor.remaining <= SETTLED_TOLERANCE {
                i += 1;
            }
            if debtor.remaining <= SETTLED_TOLERANCE {
                j += 1;
            }
        }

        trace
    }

    /// Splits balances into creditors and debtors (as positive magnitudes),
    /// dropping anything within the settled band.
    fn partition(balances: &[Balance]) -> (Vec<Party>, Vec<Party>) {
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();

        for balance in balances {
            if balance.amount > SETTLED_TOLERANCE {
                creditors.push(Party {
                    participant: balance.participant.clone(),
                    remaining: balance.amount,
                });
            } else if balance.amount < -SETTLED_TOLERANCE {
                debtors.push(Party {
                    participant: balance.participant.clone(),
                    remaining: -balance.amount,
                });
            }
        }

        (creditors, debtors)
    }
}
