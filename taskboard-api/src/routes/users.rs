/// User endpoints
///
/// The client's sign-in sync looks a principal up by subject id and creates
/// the user when the lookup answers 404.
///
/// # Endpoints
///
/// - `GET /users` - List users
/// - `GET /users/:subject_id` - Find the user linked to an identity subject
/// - `POST /users` - Create a user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::user::{CreateUser, User, SUBJECT_ID_CONSTRAINT};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Identity provider subject id
    #[validate(length(min = 1, max = 255, message = "Subject id is required"))]
    pub subject_id: String,

    /// Login name
    #[validate(length(min = 1, max = 255, message = "Username is required"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Profile picture reference
    pub profile_picture_url: Option<String>,

    /// Team to join
    pub team_id: Option<i32>,
}

/// Lists users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db)
        .await
        .map_err(|e| ApiError::server_error("Error retrieving users", e))?;

    Ok(Json(users))
}

/// Finds the user linked to an identity subject
///
/// # Errors
///
/// - `404 Not Found`: No user has this subject id yet
/// - `500 Internal Server Error`: Lookup failed
pub async fn get_user(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_subject_id(&state.db, &subject_id)
        .await
        .map_err(|e| ApiError::server_error("Error retrieving user", e))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Creates a user
///
/// Responds with the created record. Two concurrent sign-ins for the same
/// subject race here; the loser gets 409 and should re-read the user.
///
/// # Errors
///
/// - `409 Conflict`: Subject id already linked to a user
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Insert failed
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let subject_id = req.subject_id.clone();
    let result = User::create(
        &state.db,
        CreateUser {
            subject_id: req.subject_id,
            username: req.username,
            email: req.email,
            profile_picture_url: req.profile_picture_url,
            team_id: req.team_id,
        },
    )
    .await;

    match result {
        Ok(user) => {
            tracing::info!(user_id = user.user_id, subject_id = %user.subject_id, "Created user");
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(sqlx::Error::Database(db_err))
            if db_err.constraint() == Some(SUBJECT_ID_CONSTRAINT) =>
        {
            tracing::warn!(subject_id = %subject_id, "User already exists for subject");
            Err(ApiError::Conflict(
                "A user with this subject id already exists".to_string(),
            ))
        }
        Err(e) => Err(ApiError::server_error("Error creating user", e)),
    }
}
