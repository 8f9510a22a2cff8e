/// Team endpoints
///
/// - `GET /teams` - List teams

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use taskboard_shared::models::team::Team;

/// Lists teams
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<Vec<Team>>> {
    let teams = Team::list(&state.db)
        .await
        .map_err(|e| ApiError::server_error("Error retrieving teams", e))?;

    Ok(Json(teams))
}
