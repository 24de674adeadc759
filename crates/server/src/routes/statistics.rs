use axum::{extract::State, Json};
use common::observability;
use service::roster::RosterStatistics;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/statistics", tag = "통계",
    responses(
        (status = 200, description = "Roster statistics", body = crate::openapi::RosterStatisticsDoc),
        (status = 404, description = "Roster is empty", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_statistics(State(state): State<ServerState>) -> Result<Json<RosterStatistics>, JsonApiError> {
    observability::record_request("statistics");
    match state.roster.statistics().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            warn!(err = %e, "statistics unavailable");
            observability::record_error(e.kind());
            Err(e.into())
        }
    }
}
