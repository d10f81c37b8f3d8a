//! Split preview routes.

use axum::{
    Json, Router, http::StatusCode, response::IntoResponse, routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;
use crate::routes::error_response;
use settleup_core::split::{
    SplitAllocation, SplitCalculator, SplitMode, Transaction, validate_shape, validate_split,
};
use settleup_shared::types::TransactionId;

/// Creates the split routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/splits/preview", post(preview_split))
}

/// Why a split does not add up.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitProblem {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Response for a split preview.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPreviewResponse {
    /// Transaction previewed.
    pub transaction_id: TransactionId,
    /// Mode that was applied.
    pub split_mode: SplitMode,
    /// Owed amount per participant.
    pub allocation: SplitAllocation,
    /// Sum of the allocation.
    pub total: Decimal,
    /// True if the split adds up.
    pub valid: bool,
    /// Reason the split does not add up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<SplitProblem>,
}

/// POST /splits/preview
async fn preview_split(Json(transaction): Json<Transaction>) -> impl IntoResponse {
    if let Err(e) = validate_shape(&transaction) {
        return error_response(StatusCode::BAD_REQUEST, e.error_code(), e.to_string());
    }

    let allocation = SplitCalculator::split_amounts(&transaction);
    let problem = validate_split(&transaction).err().map(|e| SplitProblem {
        code: e.error_code().to_string(),
        message: e.to_string(),
    });

    debug!(
        transaction_id = %transaction.id,
        mode = %transaction.split_mode,
        valid = problem.is_none(),
        "Previewed split"
    );

    let response = SplitPreviewResponse {
        transaction_id: transaction.id,
        split_mode: transaction.split_mode,
        total: allocation.total(),
        allocation,
        valid: problem.is_none(),
        problem,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, header::CONTENT_TYPE},
    };
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use settleup_shared::AppConfig;
    use settleup_shared::types::ParticipantId;
    use tower::ServiceExt;

    async fn preview(body: &Value) -> (StatusCode, Vec<u8>) {
        let app = routes().with_state(AppState::new(AppConfig::default()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/splits/preview")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_preview_equal_split() {
        let (status, body) = preview(&json!({
            "id": "t1",
            "payer": "Alice",
            "amount": "100",
            "description": "Dinner",
            "participants": ["Alice", "Bob", "Charlie"]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: SplitPreviewResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.valid);
        assert_eq!(response.split_mode, SplitMode::Equal);
        assert_eq!(response.total, dec!(100));
        assert_eq!(
            response.allocation.get(&ParticipantId::new("Alice")),
            Some(dec!(33.34))
        );
        assert_eq!(
            response.allocation.get(&ParticipantId::new("Bob")),
            Some(dec!(33.33))
        );
    }

    #[tokio::test]
    async fn test_preview_reports_mismatch() {
        let (status, body) = preview(&json!({
            "id": "t2",
            "payer": "Alice",
            "amount": "100",
            "description": "Hotel",
            "participants": ["Alice", "Bob"],
            "splitMode": "fixed",
            "splitDetails": [
                { "participant": "Alice", "amount": "40" },
                { "participant": "Bob", "amount": "40" }
            ]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: SplitPreviewResponse = serde_json::from_slice(&body).unwrap();
        assert!(!response.valid);
        assert_eq!(response.total, dec!(80));
        assert_eq!(response.problem.unwrap().code, "SPLIT_SUM_MISMATCH");
    }

    #[tokio::test]
    async fn test_preview_rejects_bad_shape() {
        let (status, body) = preview(&json!({
            "id": "t3",
            "payer": "Alice",
            "amount": "10",
            "description": "Snacks",
            "participants": []
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NO_PARTICIPANTS");
    }
}
