//! Proptest strategies shared by the property test modules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::split::{SplitDetail, SplitMode, Transaction};

/// Strategy to generate positive amounts (0.01 to 10,000.00).
pub fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a group of participant names.
pub fn group(max: usize) -> impl Strategy<Value = Vec<String>> {
    (2usize..=max).prop_map(|n| (0..n).map(|i| format!("P{i}")).collect())
}

/// Strategy to generate one well-formed transaction whose split adds up
/// exactly (equal, shares, or percentage mode) over members of `names`.
pub fn transaction(names: Vec<String>) -> impl Strategy<Value = Transaction> {
    let n = names.len();
    (
        0..n,
        positive_amount(),
        prop::sample::subsequence(names, 1..=n),
        prop::collection::vec(1u32..10, n),
        0u8..3,
    )
        .prop_map(|(payer_idx, amount, members, weights, mode)| {
            let payer = format!("P{payer_idx}");
            let mut participants = members;
            if mode == 0 && !participants.contains(&payer) {
                participants.push(payer.clone());
            }
            let tx = Transaction::equal("t", payer, amount, "generated", participants.clone());
            match mode {
                0 => tx,
                1 => tx.with_details(
                    SplitMode::Shares,
                    participants
                        .iter()
                        .zip(&weights)
                        .map(|(p, w)| SplitDetail::shares(p.as_str(), *w))
                        .collect(),
                ),
                _ => {
                    let total: u32 = weights.iter().take(participants.len()).sum();
                    tx.with_details(
                        SplitMode::Percentage,
                        participants
                            .iter()
                            .zip(&weights)
                            .map(|(p, w)| {
                                let pct = Decimal::ONE_HUNDRED * Decimal::from(*w)
                                    / Decimal::from(total);
                                SplitDetail::percentage(p.as_str(), pct.round_dp(4))
                            })
                            .collect(),
                    )
                }
            }
        })
}

/// Strategy to generate a group plus a list of transactions among it.
pub fn ledger(
    max_people: usize,
    max_transactions: usize,
) -> impl Strategy<Value = (Vec<String>, Vec<Transaction>)> {
    group(max_people).prop_flat_map(move |names| {
        let txs = prop::collection::vec(transaction(names.clone()), 0..=max_transactions);
        (Just(names), txs)
    })
}
