//! Ledger and settlement-plan documents read by the CLI.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use settleup_core::balance::{Balance, BalanceAggregator, ParticipantSummary};
use settleup_core::settlement::{
    MatchStep, Settlement, SettlementError, SettlementOptimizer, SettlementReport,
    SettlementService, check_settlements,
};
use settleup_core::split::{Transaction, validate_transactions};
use settleup_shared::LimitsConfig;
use settleup_shared::types::{ParticipantId, TransactionId};

/// A ledger file: either a bare transaction array or an object with
/// optional known participants.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LedgerDocument {
    /// `[ {transaction}, ... ]`
    Bare(Vec<Transaction>),
    /// `{ "transactions": [...], "knownParticipants": [...] }`
    Full {
        /// Transactions to settle.
        transactions: Vec<Transaction>,
        /// Participants to report even without transactions.
        #[serde(default, rename = "knownParticipants")]
        known_participants: Option<Vec<ParticipantId>>,
    },
}

impl LedgerDocument {
    /// Parses a ledger from JSON text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Invalid ledger document")
    }

    /// Transactions in the ledger.
    pub fn transactions(&self) -> &[Transaction] {
        match self {
            Self::Bare(transactions) | Self::Full { transactions, .. } => transactions,
        }
    }

    /// Known participants, if listed.
    pub fn known_participants(&self) -> Option<&[ParticipantId]> {
        match self {
            Self::Bare(_) => None,
            Self::Full {
                known_participants, ..
            } => known_participants.as_deref(),
        }
    }
}

/// Split that does not add up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    /// Offending transaction.
    pub transaction_id: TransactionId,
    /// Error code.
    pub code: &'static str,
    /// Message.
    pub message: String,
}

/// Output of `settleup compute` for one ledger.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeOutput {
    /// Source file.
    pub file: String,
    /// Balances, settlements and totals.
    #[serde(flatten)]
    pub report: SettlementReport,
    /// Paid/owed totals per participant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<ParticipantSummary>>,
    /// Split inconsistencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
    /// Optimizer steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<MatchStep>>,
}

/// What to include besides the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeOptions {
    /// Include optimizer steps.
    pub trace: bool,
    /// Include split warnings.
    pub warnings: bool,
    /// Include per-participant summaries.
    pub summaries: bool,
    /// Fail if any split does not add up.
    pub strict: bool,
}

/// Settles one ledger.
pub fn compute(
    file: &str,
    ledger: &LedgerDocument,
    limits: &LimitsConfig,
    options: ComputeOptions,
) -> anyhow::Result<ComputeOutput> {
    let transactions = ledger.transactions();
    let known = ledger.known_participants();

    let report = SettlementService::compute_checked(transactions, known, limits)
        .with_context(|| format!("{file}: cannot settle"))?;

    let problems = validate_transactions(transactions);
    if options.strict
        && let Some((id, err)) = problems.first()
    {
        anyhow::bail!("{file}: transaction {id}: {err}");
    }

    let warnings = options.warnings.then(|| {
        problems
            .into_iter()
            .map(|(transaction_id, err)| Warning {
                transaction_id,
                code: err.error_code(),
                message: err.to_string(),
            })
            .collect()
    });
    let summaries = options
        .summaries
        .then(|| BalanceAggregator::participant_summaries(transactions, known));
    let trace = options
        .trace
        .then(|| SettlementOptimizer::optimize_with_trace(&report.balances).steps);

    Ok(ComputeOutput {
        file: file.to_string(),
        report,
        summaries,
        warnings,
        trace,
    })
}

/// A settlement plan file for `settleup verify`.
#[derive(Debug, Deserialize)]
pub struct PlanDocument {
    /// Balances before settlement.
    pub balances: Vec<Balance>,
    /// Proposed transfers.
    pub settlements: Vec<Settlement>,
}

impl PlanDocument {
    /// Parses a plan from JSON text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Invalid settlement plan document")
    }
}

/// Result of verifying a plan.
#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    /// Source file.
    pub file: String,
    /// True if every balance resolves.
    pub valid: bool,
    /// First unresolved participant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<ParticipantId>,
    /// Its residual.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual: Option<Decimal>,
}

/// Verifies a settlement plan.
pub fn verify(file: &str, plan: &PlanDocument) -> VerifyOutput {
    match check_settlements(&plan.balances, &plan.settlements) {
        Ok(()) => VerifyOutput {
            file: file.to_string(),
            valid: true,
            participant: None,
            residual: None,
        },
        Err(SettlementError::Unresolved {
            participant,
            residual,
        }) => VerifyOutput {
            file: file.to_string(),
            valid: false,
            participant: Some(participant),
            residual: Some(residual),
        },
        Err(_) => VerifyOutput {
            file: file.to_string(),
            valid: false,
            participant: None,
            residual: None,
        },
    }
}
