//! Property-based tests for balance aggregation.
//!
//! - Conservation: balances sum to zero within rounding slack
//! - Idempotence: same input, same output
//! - Ordering: output is sorted descending by amount
//! - Known participants always appear

use proptest::prelude::*;
use rust_decimal::Decimal;
use settleup_shared::types::{ParticipantId, SPLIT_TOLERANCE};

use super::aggregator::BalanceAggregator;
use crate::testing::ledger;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Sum of all balances stays within 0.02 per transaction of zero.
    #[test]
    fn prop_balances_conserve_money((_, transactions) in ledger(8, 12)) {
        let balances = BalanceAggregator::compute_balances(&transactions, None);
        let sum: Decimal = balances.iter().map(|b| b.amount).sum();
        let slack = SPLIT_TOLERANCE * Decimal::from(transactions.len());

        prop_assert!(
            sum.abs() <= slack,
            "sum {} exceeds slack {} for {} transactions",
            sum,
            slack,
            transactions.len()
        );
    }

    /// Computing twice yields identical output.
    #[test]
    fn prop_balances_idempotent((names, transactions) in ledger(8, 12)) {
        let known: Vec<ParticipantId> = names.iter().map(|n| ParticipantId::new(n.as_str())).collect();

        let first = BalanceAggregator::compute_balances(&transactions, Some(&known));
        let second = BalanceAggregator::compute_balances(&transactions, Some(&known));
        prop_assert_eq!(first, second);
    }

    /// Output is sorted descending by amount.
    #[test]
    fn prop_balances_sorted_descending((_, transactions) in ledger(8, 12)) {
        let balances = BalanceAggregator::compute_balances(&transactions, None);
        for pair in balances.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }
    }

    /// Every known participant appears exactly once, and nobody else does.
    #[test]
    fn prop_known_participants_all_present((names, transactions) in ledger(8, 12)) {
        let known: Vec<ParticipantId> = names.iter().map(|n| ParticipantId::new(n.as_str())).collect();
        let balances = BalanceAggregator::compute_balances(&transactions, Some(&known));

        prop_assert_eq!(balances.len(), known.len());
        for participant in &known {
            prop_assert_eq!(
                balances.iter().filter(|b| &b.participant == participant).count(),
                1
            );
        }
    }

    /// Balances are cent-precise and never carry sub-cent noise.
    #[test]
    fn prop_balances_are_cents((_, transactions) in ledger(8, 12)) {
        let balances = BalanceAggregator::compute_balances(&transactions, None);
        for balance in &balances {
            prop_assert_eq!(balance.amount, balance.amount.round_dp(2));
            prop_assert!(balance.amount.is_zero() || balance.amount.abs() >= Decimal::new(1, 2));
        }
    }
}
