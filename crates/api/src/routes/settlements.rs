//! Settlement routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AppState;
use crate::routes::{error_response, settlement_error_response};
use settleup_core::balance::{Balance, BalanceAggregator, ParticipantSummary};
use settleup_core::settlement::{
    MatchStep, Settlement, SettlementError, SettlementOptimizer, SettlementReport,
    SettlementService, check_settlements,
};
use settleup_core::split::{Transaction, validate_transactions};
use settleup_shared::types::{ParticipantId, TransactionId};

/// Creates the settlement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settlements/compute", post(compute_settlement))
        .route("/settlements/validate", post(validate_settlements))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for computing a settlement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeSettlementRequest {
    /// Transactions to settle.
    pub transactions: Vec<Transaction>,
    /// Participants to report even if they appear in no transaction.
    #[serde(default)]
    pub known_participants: Option<Vec<ParticipantId>>,
    /// Include the optimizer's matching steps in the response.
    #[serde(default)]
    pub include_trace: bool,
}

/// A split that does not add up, reported without blocking the settlement.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitWarning {
    /// Offending transaction.
    pub transaction_id: TransactionId,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Response for a settlement computation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeSettlementResponse {
    /// Balances, settlements and totals.
    #[serde(flatten)]
    pub report: SettlementReport,
    /// Paid/owed totals per participant.
    pub summaries: Vec<ParticipantSummary>,
    /// Split inconsistencies found in the input.
    pub warnings: Vec<SplitWarning>,
    /// Matching steps, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<MatchStep>>,
}

/// Request body for verifying a settlement plan.
#[derive(Debug, Deserialize)]
pub struct ValidateSettlementsRequest {
    /// Balances before settlement.
    pub balances: Vec<Balance>,
    /// Proposed transfers.
    pub settlements: Vec<Settlement>,
}

/// A participant left unresolved by a settlement plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnresolvedBalance {
    /// The participant.
    pub participant: ParticipantId,
    /// What is left after applying every settlement.
    pub residual: Decimal,
}

/// Response for settlement verification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateSettlementsResponse {
    /// True if every balance resolves to within one cent.
    pub valid: bool,
    /// First unresolved participant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<UnresolvedBalance>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /settlements/compute
async fn compute_settlement(
    State(state): State<AppState>,
    Json(request): Json<ComputeSettlementRequest>,
) -> impl IntoResponse {
    let known = request.known_participants.as_deref();

    let report =
        match SettlementService::compute_checked(&request.transactions, known, &state.config.limits)
        {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Rejected settlement request");
                return settlement_error_response(&e);
            }
        };

    let warnings: Vec<SplitWarning> = validate_transactions(&request.transactions)
        .into_iter()
        .map(|(transaction_id, e)| SplitWarning {
            transaction_id,
            code: e.error_code().to_string(),
            message: e.to_string(),
        })
        .collect();

    let trace = request
        .include_trace
        .then(|| SettlementOptimizer::optimize_with_trace(&report.balances).steps);

    info!(
        transactions = report.total_transactions,
        participants = report.balances.len(),
        settlements = report.optimized_transaction_count,
        warnings = warnings.len(),
        "Computed settlement"
    );

    let response = ComputeSettlementResponse {
        summaries: BalanceAggregator::participant_summaries(&request.transactions, known),
        report,
        warnings,
        trace,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /settlements/validate
async fn validate_settlements(
    State(state): State<AppState>,
    Json(request): Json<ValidateSettlementsRequest>,
) -> impl IntoResponse {
    let limit = state.config.limits.max_participants;
    if request.balances.len() > limit {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "TOO_MANY_PARTICIPANTS",
            format!(
                "Too many participants: {} exceeds limit of {limit}",
                request.balances.len()
            ),
        );
    }

    let response = match check_settlements(&request.balances, &request.settlements) {
        Ok(()) => ValidateSettlementsResponse {
            valid: true,
            unresolved: None,
        },
        Err(SettlementError::Unresolved {
            participant,
            residual,
        }) => ValidateSettlementsResponse {
            valid: false,
            unresolved: Some(UnresolvedBalance {
                participant,
                residual,
            }),
        },
        Err(e) => return settlement_error_response(&e),
    };

    (StatusCode::OK, Json(response)).into_response()
}
