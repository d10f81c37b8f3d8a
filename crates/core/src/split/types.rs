//! Expense transaction and split configuration types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use settleup_shared::types::{ParticipantId, TransactionId};

/// Rule governing how a transaction amount is divided among participants.
///
/// Unknown or missing modes deserialize to [`SplitMode::Equal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SplitMode {
    /// Divide evenly; the first participant absorbs the odd cent.
    #[default]
    Equal,
    /// Each detail carries a percentage of the amount.
    Percentage,
    /// Each detail carries a fixed amount.
    Fixed,
    /// Each detail carries an integer weight.
    Shares,
}

impl SplitMode {
    /// Parses a mode name, falling back to `Equal` for anything unrecognized.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "percentage" | "percent" => Self::Percentage,
            "fixed" | "exact" | "amount" => Self::Fixed,
            "shares" | "share" | "weighted" => Self::Shares,
            _ => Self::Equal,
        }
    }
}

impl From<String> for SplitMode {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Percentage => write!(f, "percentage"),
            Self::Fixed => write!(f, "fixed"),
            Self::Shares => write!(f, "shares"),
        }
    }
}

/// Per-participant split parameter.
///
/// Only the field matching the owning transaction's [`SplitMode`] is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDetail {
    /// Participant this detail applies to.
    pub participant: ParticipantId,
    /// Fixed amount owed (fixed mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Percentage of the total, 0-100 (percentage mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Positive share count (shares mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<u32>,
}

impl SplitDetail {
    /// Detail with a fixed amount.
    #[must_use]
    pub fn fixed(participant: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            participant: participant.into(),
            amount: Some(amount),
            percentage: None,
            shares: None,
        }
    }

    /// Detail with a percentage.
    #[must_use]
    pub fn percentage(participant: impl Into<ParticipantId>, percentage: Decimal) -> Self {
        Self {
            participant: participant.into(),
            amount: None,
            percentage: Some(percentage),
            shares: None,
        }
    }

    /// Detail with a share count.
    #[must_use]
    pub fn shares(participant: impl Into<ParticipantId>, shares: u32) -> Self {
        Self {
            participant: participant.into(),
            amount: None,
            percentage: None,
            shares: Some(shares),
        }
    }
}

/// An expense event paid by one participant and owed by a set of participants.
///
/// Created by the ingestion layer and treated as immutable by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique, opaque identifier.
    pub id: TransactionId,
    /// Participant who paid.
    pub payer: ParticipantId,
    /// Positive amount paid.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Participants sharing the expense. Order matters only for the
    /// equal-split remainder.
    pub participants: Vec<ParticipantId>,
    /// How the amount is divided.
    #[serde(default, alias = "splitType")]
    pub split_mode: SplitMode,
    /// One entry per participant; shape depends on `split_mode`.
    #[serde(default)]
    pub split_details: Vec<SplitDetail>,
}

impl Transaction {
    /// Creates an equal-split transaction.
    #[must_use]
    pub fn equal<P>(
        id: impl Into<TransactionId>,
        payer: impl Into<ParticipantId>,
        amount: Decimal,
        description: impl Into<String>,
        participants: impl IntoIterator<Item = P>,
    ) -> Self
    where
        P: Into<ParticipantId>,
    {
        Self {
            id: id.into(),
            payer: payer.into(),
            amount,
            description: description.into(),
            participants: participants.into_iter().map(Into::into).collect(),
            split_mode: SplitMode::Equal,
            split_details: Vec::new(),
        }
    }

    /// Replaces the split mode and details, deriving the participant list
    /// from the details.
    #[must_use]
    pub fn with_details(mut self, split_mode: SplitMode, split_details: Vec<SplitDetail>) -> Self {
        self.participants = split_details.iter().map(|d| d.participant.clone()).collect();
        self.split_mode = split_mode;
        self.split_details = split_details;
        self
    }

    /// Returns true if the payer is one of the owing participants.
    #[must_use]
    pub fn payer_participates(&self) -> bool {
        self.participants.contains(&self.payer)
    }
}

/// One participant's owed share of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedShare {
    /// The owing participant.
    pub participant: ParticipantId,
    /// Amount owed.
    pub amount: Decimal,
}

/// Mapping of participant to owed amount, in first-assigned order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitAllocation(Vec<OwedShare>);

impl SplitAllocation {
    /// Creates an empty allocation.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Assigns an owed amount, replacing any earlier amount for the same
    /// participant.
    pub fn assign(&mut self, participant: &ParticipantId, amount: Decimal) {
        match self.0.iter_mut().find(|s| &s.participant == participant) {
            Some(share) => share.amount = amount,
            None => self.0.push(OwedShare {
                participant: participant.clone(),
                amount,
            }),
        }
    }

    /// Looks up the amount owed by a participant.
    #[must_use]
    pub fn get(&self, participant: &ParticipantId) -> Option<Decimal> {
        self.0
            .iter()
            .find(|s| &s.participant == participant)
            .map(|s| s.amount)
    }

    /// Sum of all owed amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.iter().map(|s| s.amount).sum()
    }

    /// Iterates over the owed shares.
    pub fn iter(&self) -> std::slice::Iter<'_, OwedShare> {
        self.0.iter()
    }

    /// Number of owing participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nobody owes anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SplitAllocation {
    type Item = &'a OwedShare;
    type IntoIter = std::slice::Iter<'a, OwedShare>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
