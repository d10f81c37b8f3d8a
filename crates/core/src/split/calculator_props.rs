//! Property-based tests for the split calculator.
//!
//! - Equal-split exactness
//! - Weighted splits always sum to the amount
//! - Validation accepts everything the calculator produces

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::SplitCalculator;
use super::types::{SplitDetail, SplitMode, Transaction};
use super::validation::validate_split;

/// Strategy to generate positive amounts (0.01 to 100,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate participant names P0..Pn.
fn participants(max: usize) -> impl Strategy<Value = Vec<String>> {
    (1usize..=max).prop_map(|n| (0..n).map(|i| format!("P{i}")).collect())
}

/// Strategy to generate share counts.
fn share_counts() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..20, 1..10)
}

/// Strategy to generate percentages summing to 100.
fn percentages_summing_to_100() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..100, 1..10).prop_map(|values| {
        let sum: u32 = values.iter().sum();
        let hundred = Decimal::ONE_HUNDRED;
        values
            .iter()
            .map(|v| (hundred * Decimal::from(*v) / Decimal::from(sum)).round_dp(4))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Equal splits sum to the amount exactly, not just within tolerance.
    #[test]
    fn prop_equal_split_is_exact(
        amount in positive_amount(),
        names in participants(12),
    ) {
        let payer = names[0].clone();
        let tx = Transaction::equal("t", payer, amount, "prop", names.clone());
        let split = SplitCalculator::split_amounts(&tx);

        prop_assert_eq!(split.len(), names.len());
        prop_assert_eq!(split.total(), amount);
    }

    /// No equal share differs from another by more than the remainder cents.
    #[test]
    fn prop_equal_split_non_first_shares_identical(
        amount in positive_amount(),
        names in participants(12),
    ) {
        let tx = Transaction::equal("t", names[0].clone(), amount, "prop", names.clone());
        let split = SplitCalculator::split_amounts(&tx);
        let rest: Vec<Decimal> = split.iter().skip(1).map(|s| s.amount).collect();

        for pair in rest.windows(2) {
            prop_assert_eq!(pair[0], pair[1]);
        }
        if let (Some(first), Some(other)) = (split.iter().next(), rest.first()) {
            prop_assert!(first.amount >= *other);
        }
    }

    /// Shares splits sum to the amount because the last entry absorbs drift.
    #[test]
    fn prop_shares_split_is_exact(
        amount in positive_amount(),
        counts in share_counts(),
    ) {
        let details: Vec<SplitDetail> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| SplitDetail::shares(format!("P{i}"), *c))
            .collect();
        let tx = Transaction::equal("t", "P0", amount, "prop", Vec::<String>::new())
            .with_details(SplitMode::Shares, details);

        let split = SplitCalculator::split_amounts(&tx);
        prop_assert_eq!(split.total(), amount);
        prop_assert!(validate_split(&tx).is_ok());
    }

    /// Percentage splits sum to the amount and pass validation.
    #[test]
    fn prop_percentage_split_is_exact(
        amount in positive_amount(),
        percentages in percentages_summing_to_100(),
    ) {
        let details: Vec<SplitDetail> = percentages
            .iter()
            .enumerate()
            .map(|(i, pct)| SplitDetail::percentage(format!("P{i}"), *pct))
            .collect();
        let tx = Transaction::equal("t", "P0", amount, "prop", Vec::<String>::new())
            .with_details(SplitMode::Percentage, details);

        let split = SplitCalculator::split_amounts(&tx);
        prop_assert_eq!(split.total(), amount);
        prop_assert!(validate_split(&tx).is_ok());
    }

    /// Splitting is deterministic.
    #[test]
    fn prop_split_is_deterministic(
        amount in positive_amount(),
        names in participants(8),
    ) {
        let tx = Transaction::equal("t", names[0].clone(), amount, "prop", names);
        prop_assert_eq!(
            SplitCalculator::split_amounts(&tx),
            SplitCalculator::split_amounts(&tx)
        );
    }
}
