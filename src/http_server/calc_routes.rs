//! Calculation Route
//!
//! Validates the request, checks the allow-list, computes modes and
//! recommendations and appends the result to the history.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use super::errors::ApiResult;
use super::state::AppState;
use crate::calc::{CalcOutcome, CalcRequest};
use crate::history::HistoryEntry;

pub fn calc_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/calc", post(calc_handler))
        .with_state(state)
}

async fn calc_handler(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Json<CalcOutcome>> {
    let request = CalcRequest::from_slice(&body)?;
    state.allow_list.require(request.user_id)?;

    let outcome = request.evaluate();
    state
        .history
        .append(HistoryEntry::record(&request, &outcome.calculation))?;

    tracing::info!(
        user_id = request.user_id,
        tool_type = %request.tool_type,
        tool_material = %request.tool_material,
        vc = outcome.calculation.vc,
        n = outcome.calculation.n,
        "cutting modes calculated"
    );

    Ok(Json(outcome))
}
