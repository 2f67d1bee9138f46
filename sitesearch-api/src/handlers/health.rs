use crate::error::ApiResult;
use crate::health::{NotReadyReason, Verdict};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// Readiness check
///
/// 200 when the search index is queryable, 503 while it is being rebuilt or
/// cannot be reached. Job system failures surface as 500.
pub async fn health_handler(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let verdict = state.health.evaluate().await?;
    Ok(verdict_response(&verdict))
}

fn verdict_response(verdict: &Verdict) -> (StatusCode, Json<Value>) {
    match verdict {
        Verdict::Ready(info) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "index": info.index_name,
                "num_docs": info.num_docs,
            })),
        ),
        Verdict::NotReady(reason) => {
            let mut body = json!({
                "status": "not_ready",
                "reason": reason.as_str(),
            });
            if let NotReadyReason::SearchUnavailable(error) = reason {
                body["error"] = json!(error);
            }
            (StatusCode::SERVICE_UNAVAILABLE, Json(body))
        }
    }
}
