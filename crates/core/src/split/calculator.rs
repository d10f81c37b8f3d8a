//! Per-transaction split calculation.
//!
//! Every mode guarantees a deterministic result that sums to the transaction
//! amount (fixed mode excepted, which takes the declared amounts verbatim):
//!
//! - Equal: floor each share to cents, the first participant absorbs the
//!   leftover cents.
//! - Percentage / Shares: round each share to cents, the last detail absorbs
//!   all rounding drift.

use rust_decimal::Decimal;
use settleup_shared::types::{floor_money, round_money};

use super::types::{SplitAllocation, SplitDetail, SplitMode, Transaction};

/// Split calculation utility.
pub struct SplitCalculator;

impl SplitCalculator {
    /// Returns the amount owed by each participant of a transaction.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use settleup_core::split::{SplitCalculator, Transaction};
    ///
    /// let tx = Transaction::equal("t1", "Alice", dec!(100), "Dinner", ["Alice", "Bob", "Charlie"]);
    /// let split = SplitCalculator::split_amounts(&tx);
    /// assert_eq!(split.total(), dec!(100));
    /// ```
    #[must_use]
    pub fn split_amounts(transaction: &Transaction) -> SplitAllocation {
        match transaction.split_mode {
            SplitMode::Equal => Self::split_equal(transaction),
            SplitMode::Fixed => Self::split_fixed(&transaction.split_details),
            SplitMode::Percentage => Self::split_weighted(
                transaction.amount,
                &transaction.split_details,
                Decimal::ONE_HUNDRED,
                |d| d.percentage.unwrap_or(Decimal::ZERO),
            ),
            SplitMode::Shares => {
                let total_shares: Decimal = transaction
                    .split_details
                    .iter()
                    .map(|d| Decimal::from(d.shares.unwrap_or(0)))
                    .sum();
                if total_shares.is_zero() {
                    return SplitAllocation::new();
                }
                Self::split_weighted(
                    transaction.amount,
                    &transaction.split_details,
                    total_shares,
                    |d| Decimal::from(d.shares.unwrap_or(0)),
                )
            }
        }
    }

    fn split_equal(transaction: &Transaction) -> SplitAllocation {
        let mut allocation = SplitAllocation::new();
        let Some(first) = transaction.participants.first() else {
            return allocation;
        };

        let count = Decimal::from(transaction.participants.len());
        let base = floor_money(transaction.amount / count);
        let remainder = round_money(transaction.amount - base * count);

        for participant in &transaction.participants {
            allocation.assign(participant, base);
        }
        allocation.assign(first, base + remainder);
        allocation
    }

    fn split_fixed(details: &[SplitDetail]) -> SplitAllocation {
        let mut allocation = SplitAllocation::new();
        for detail in details {
            if let Some(amount) = detail.amount {
                allocation.assign(&detail.participant, amount);
            }
        }
        allocation
    }

    /// Allocates `amount * weight / denominator` to every detail but the
    /// last, which receives whatever is left.
    fn split_weighted<W>(
        amount: Decimal,
        details: &[SplitDetail],
        denominator: Decimal,
        weight: W,
    ) -> SplitAllocation
    where
        W: Fn(&SplitDetail) -> Decimal,
    {
        let mut allocation = SplitAllocation::new();
        let Some((last, rest)) = details.split_last() else {
            return allocation;
        };

        let mut running_total = Decimal::ZERO;
        for detail in rest {
            let share = round_money(amount * weight(detail) / denominator);
            running_total += share;
            allocation.assign(&detail.participant, share);
        }
        allocation.assign(&last.participant, amount - running_total);
        allocation
    }
}
