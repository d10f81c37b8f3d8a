//! Net balance aggregation across transactions.
//!
//! Each transaction credits its full amount to the payer and debits each
//! participant's owed share, so the payer's net contribution falls out
//! naturally. Totals are rounded to cents and sub-cent noise is snapped to
//! zero before sorting.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use settleup_shared::types::{ParticipantId, round_money, snap_settled};

use crate::split::{SplitCalculator, Transaction};

/// A participant's net position.
///
/// Positive: the group owes them (creditor). Negative: they owe the group
/// (debtor). Zero: settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The participant.
    pub participant: ParticipantId,
    /// Net amount.
    pub amount: Decimal,
}

impl Balance {
    /// Creates a balance.
    #[must_use]
    pub fn new(participant: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            participant: participant.into(),
            amount,
        }
    }
}

/// Totals paid and owed by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    /// The participant.
    pub participant: ParticipantId,
    /// Sum of transaction amounts they paid.
    pub total_paid: Decimal,
    /// Sum of shares they owe.
    pub total_owed: Decimal,
    /// `total_paid - total_owed`.
    pub net: Decimal,
}

/// Running per-participant totals in first-seen order.
#[derive(Debug, Default)]
struct Tally {
    order: Vec<ParticipantId>,
    index: HashMap<ParticipantId, usize>,
    paid: Vec<Decimal>,
    owed: Vec<Decimal>,
}

impl Tally {
    fn seeded(known_participants: Option<&[ParticipantId]>) -> Self {
        let mut tally = Self::default();
        for participant in known_participants.unwrap_or_default() {
            tally.slot(participant);
        }
        tally
    }

    fn slot(&mut self, participant: &ParticipantId) -> usize {
        if let Some(&i) = self.index.get(participant) {
            return i;
        }
        let i = self.order.len();
        self.order.push(participant.clone());
        self.index.insert(participant.clone(), i);
        self.paid.push(Decimal::ZERO);
        self.owed.push(Decimal::ZERO);
        i
    }

    fn fold(mut self, transactions: &[Transaction]) -> Self {
        for tx in transactions {
            let payer = self.slot(&tx.payer);
            self.paid[payer] += tx.amount;

            for share in &SplitCalculator::split_amounts(tx) {
                let owing = self.slot(&share.participant);
                self.owed[owing] += share.amount;
            }
        }
        self
    }

    fn rows(self) -> impl Iterator<Item = (ParticipantId, Decimal, Decimal)> {
        self.order
            .into_iter()
            .zip(self.paid)
            .zip(self.owed)
            .map(|((participant, paid), owed)| (participant, paid, owed))
    }
}

/// Balance aggregation utility.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Computes one net balance per participant.
    ///
    /// Steps:
    /// 1. Seed zero totals for `known_participants`, if given.
    /// 2. Credit each payer and debit each owed share, in input order.
    /// 3. Round to cents and snap sub-cent values to zero.
    /// 4. Stable sort descending by amount (ties keep first-seen order).
    ///
    /// Without `known_participants` the set is the union of payers and owing
    /// participants.
    #[must_use]
    pub fn compute_balances(
        transactions: &[Transaction],
        known_participants: Option<&[ParticipantId]>,
    ) -> Vec<Balance> {
        let mut balances: Vec<Balance> = Tally::seeded(known_participants)
            .fold(transactions)
            .rows()
            .map(|(participant, paid, owed)| Balance {
                participant,
                amount: snap_settled(round_money(paid - owed)),
            })
            .collect();

        balances.sort_by(|a, b| b.amount.cmp(&a.amount));
        balances
    }

    /// Reports totals paid and owed per participant, in first-seen order.
    #[must_use]
    pub fn participant_summaries(
        transactions: &[Transaction],
        known_participants: Option<&[ParticipantId]>,
    ) -> Vec<ParticipantSummary> {
        Tally::seeded(known_participants)
            .fold(transactions)
            .rows()
            .map(|(participant, paid, owed)| ParticipantSummary {
                participant,
                total_paid: round_money(paid),
                total_owed: round_money(owed),
                net: snap_settled(round_money(paid - owed)),
            })
            .collect()
    }
}
