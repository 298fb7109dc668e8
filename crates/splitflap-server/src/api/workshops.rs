use axum::{extract::State, Extension, Json};
use chrono::Utc;
use splitflap_core::WorkshopsResponse;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// `/api/workshops`: the schedule document read by the display.
pub(super) async fn list_workshops(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<WorkshopsResponse>, ApiError> {
    let today = Utc::now().date_naive();

    let data = splitflap_catalog::list_workshops(
        &state.catalog,
        state.feed_variant,
        &state.collection_id,
        today,
    )
    .await
    .map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "catalog fetch failed");
        ApiError::new(req_id.0.clone(), "internal_error", "catalog fetch failed")
    })?;

    tracing::debug!(request_id = %req_id.0, entries = data.len(), "serving workshops");
    Ok(Json(WorkshopsResponse { data }))
}
