/// Project endpoints
///
/// # Endpoints
///
/// - `GET /projects` - List projects
/// - `POST /projects` - Create a project
///
/// Dates are accepted as RFC 3339 strings or plain `YYYY-MM-DD` (read as UTC
/// midnight) and always returned as RFC 3339.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    dates::parse_optional_timestamp,
    models::project::{CreateProject, Project, PRIMARY_KEY_CONSTRAINT},
};
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional start date
    pub start_date: Option<String>,

    /// Optional end date
    pub end_date: Option<String>,
}

impl CreateProjectRequest {
    fn into_create(self) -> ApiResult<CreateProject> {
        let start_date = parse_optional_timestamp(self.start_date.as_deref())
            .map_err(|e| ApiError::invalid_field("startDate", e.to_string()))?;
        let end_date = parse_optional_timestamp(self.end_date.as_deref())
            .map_err(|e| ApiError::invalid_field("endDate", e.to_string()))?;

        Ok(CreateProject {
            name: self.name,
            description: self.description,
            start_date,
            end_date,
        })
    }
}

/// Lists projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list(&state.db)
        .await
        .map_err(|e| ApiError::server_error("Error retrieving projects", e))?;

    Ok(Json(projects))
}

/// Creates a project
///
/// A primary-key collision (the id sequence fell behind rows inserted with
/// explicit ids) is retried once; the sequence has advanced by then.
///
/// # Errors
///
/// - `409 Conflict`: Primary key collided twice
/// - `422 Unprocessable Entity`: Missing name or unparseable date
/// - `500 Internal Server Error`: Insert failed
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate()?;
    let data = req.into_create()?;

    let project = match Project::create(&state.db, &data).await {
        Ok(project) => project,
        Err(e) if is_primary_key_collision(&e) => {
            tracing::warn!("Project id collision, retrying insert once");
            Project::create(&state.db, &data).await.map_err(|e| {
                if is_primary_key_collision(&e) {
                    ApiError::Conflict(
                        "A conflict occurred with the project ID. Please try again later."
                            .to_string(),
                    )
                } else {
                    ApiError::server_error("Error creating a project", e)
                }
            })?
        }
        Err(e) => return Err(ApiError::server_error("Error creating a project", e)),
    };

    tracing::info!(
        project_id = project.id,
        name = %project.name,
        requested_by = %auth.subject_id,
        "Created project"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

fn is_primary_key_collision(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(PRIMARY_KEY_CONSTRAINT)
        }
        _ => false,
    }
}
