//! Material HTTP Routes
//!
//! Listing the material cache and analysing a material by name.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use super::state::{json_object, user_id, AppState};
use crate::lenient;
use crate::materials::MaterialRecord;

pub const INSUFFICIENT_DATA: &str = "Недостаточно данных";

#[derive(Debug, Serialize)]
pub struct MaterialListResponse {
    pub materials: Vec<MaterialRecord>,
}

#[derive(Debug, Serialize)]
pub struct MaterialResponse {
    pub material: MaterialRecord,
}

pub fn material_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/materials", get(list_handler))
        .route("/api/materials/analyze", post(analyze_handler))
        .with_state(state)
}

/// Cached records; open to anyone
async fn list_handler(State(state): State<Arc<AppState>>) -> Json<MaterialListResponse> {
    Json(MaterialListResponse {
        materials: state.materials.list().into_values().collect(),
    })
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<MaterialResponse>> {
    let payload = json_object(&body)?;

    let raw_user = payload.get("user_id").cloned().unwrap_or_default();
    let name = payload
        .get("material")
        .and_then(lenient::as_text)
        .unwrap_or_default();

    if lenient::is_blank(&raw_user) || name.is_empty() {
        return Err(ApiError::BadRequest(INSUFFICIENT_DATA.to_string()));
    }

    state.allow_list.require(user_id(&raw_user)?)?;

    let material = state.materials.analyze_material(&name).await?;
    Ok(Json(MaterialResponse { material }))
}
