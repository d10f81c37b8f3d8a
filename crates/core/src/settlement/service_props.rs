//! Property-based tests for settlement optimization.
//!
//! - Correctness: applying the settlements zeroes every balance
//! - Bound: at most `n - 1` transfers for `n` non-zero balances
//! - Purity: input balances are untouched
//! - Direction: every transfer goes from a debtor to a creditor

use proptest::prelude::*;
use rust_decimal::Decimal;
use settleup_shared::types::SETTLED_TOLERANCE;

use super::optimizer::SettlementOptimizer;
use super::service::SettlementService;
use super::validation::validate_settlements;
use crate::balance::Balance;
use crate::testing::ledger;

/// Strategy to generate balances that sum to exactly zero.
///
/// Amounts are whole multiples of 0.05 so no partial match can strand a
/// single cent.
fn balanced(max: usize) -> impl Strategy<Value = Vec<Balance>> {
    prop::collection::vec(-20_000i64..20_000i64, 1..max).prop_map(|units| {
        let cents: Vec<i64> = units.into_iter().map(|u| u * 5).collect();
        let closing: i64 = -cents.iter().sum::<i64>();
        cents
            .into_iter()
            .chain(std::iter::once(closing))
            .enumerate()
            .map(|(i, c)| Balance::new(format!("P{i}"), Decimal::new(c, 2)))
            .collect()
    })
}

fn non_zero(balances: &[Balance]) -> usize {
    balances
        .iter()
        .filter(|b| b.amount.abs() > SETTLED_TOLERANCE)
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Settlements from aggregated ledgers always resolve every balance.
    #[test]
    fn prop_ledger_settlements_resolve((_, transactions) in ledger(8, 12)) {
        let report = SettlementService::compute_settlement(&transactions, None);
        prop_assert!(validate_settlements(&report.balances, &report.settlements));
    }

    /// Settlements from arbitrary zero-sum balances resolve them.
    #[test]
    fn prop_balanced_settlements_resolve(balances in balanced(12)) {
        let settlements = SettlementOptimizer::optimize(&balances);
        prop_assert!(validate_settlements(&balances, &settlements));
    }

    /// Never more than `n - 1` transfers.
    #[test]
    fn prop_settlement_count_bound(balances in balanced(12)) {
        let settlements = SettlementOptimizer::optimize(&balances);
        let bound = non_zero(&balances).saturating_sub(1);
        prop_assert!(
            settlements.len() <= bound,
            "{} settlements for {} non-zero balances",
            settlements.len(),
            non_zero(&balances)
        );
    }

    /// Same bound on aggregated ledgers.
    #[test]
    fn prop_ledger_settlement_count_bound((_, transactions) in ledger(8, 12)) {
        let report = SettlementService::compute_settlement(&transactions, None);
        let bound = non_zero(&report.balances).saturating_sub(1);
        prop_assert!(report.settlements.len() <= bound);
        prop_assert_eq!(report.optimized_transaction_count, report.settlements.len());
    }

    /// The optimizer does not mutate its input and is deterministic.
    #[test]
    fn prop_optimizer_pure(balances in balanced(12)) {
        let before = balances.clone();
        let first = SettlementOptimizer::optimize(&balances);
        let second = SettlementOptimizer::optimize(&balances);
        prop_assert_eq!(&balances, &before);
        prop_assert_eq!(first, second);
    }

    /// Transfers are positive and flow from debtors to creditors.
    #[test]
    fn prop_settlement_direction(balances in balanced(12)) {
        let amount_of = |name: &str| {
            balances
                .iter()
                .find(|b| b.participant.as_str() == name)
                .map(|b| b.amount)
                .unwrap_or_default()
        };

        for settlement in SettlementOptimizer::optimize(&balances) {
            prop_assert!(settlement.amount > SETTLED_TOLERANCE);
            prop_assert!(amount_of(settlement.from.as_str()) < Decimal::ZERO);
            prop_assert!(amount_of(settlement.to.as_str()) > Decimal::ZERO);
            prop_assert_ne!(settlement.from, settlement.to);
        }
    }
}
