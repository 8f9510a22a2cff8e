/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks?projectId=<id>` - List a project's tasks
/// - `POST /tasks` - Create a task
/// - `PATCH /tasks/:task_id/status` - Move a task to another column
///
/// The project and author of a new task must exist; the database enforces
/// this and a violation surfaces as a 500 like any other insert failure.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    dates::parse_optional_timestamp,
    models::task::{CreateTask, Task, TaskPriority, TaskStatus},
};
use validator::Validate;

/// Query string for `GET /tasks`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Project whose tasks to list
    pub project_id: i32,
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    /// Defaults to `To Do`
    pub status: Option<TaskStatus>,

    /// Defaults to `Backlog`
    pub priority: Option<TaskPriority>,

    pub tags: Option<String>,

    pub start_date: Option<String>,

    pub due_date: Option<String>,

    #[validate(range(min = 0, max = 10, message = "Points must be between 0 and 10"))]
    pub points: Option<i32>,

    pub project_id: i32,

    pub author_user_id: i32,

    pub assigned_user_id: Option<i32>,
}

impl CreateTaskRequest {
    fn into_create(self) -> ApiResult<CreateTask> {
        let start_date = parse_optional_timestamp(self.start_date.as_deref())
            .map_err(|e| ApiError::invalid_field("startDate", e.to_string()))?;
        let due_date = parse_optional_timestamp(self.due_date.as_deref())
            .map_err(|e| ApiError::invalid_field("dueDate", e.to_string()))?;

        Ok(CreateTask {
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            tags: self.tags,
            start_date,
            due_date,
            points: self.points,
            project_id: self.project_id,
            author_user_id: self.author_user_id,
            assigned_user_id: self.assigned_user_id,
        })
    }
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    /// New board column
    pub status: TaskStatus,
}

/// Lists the tasks of one project
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_project(&state.db, query.project_id)
        .await
        .map_err(|e| ApiError::server_error("Error retrieving tasks", e))?;

    Ok(Json(tasks))
}

/// Creates a task
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Missing title, points out of range or
///   unparseable date
/// - `500 Internal Server Error`: Insert failed (including unknown project
///   or author)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;
    let data = req.into_create()?;

    let task = Task::create(&state.db, data)
        .await
        .map_err(|e| ApiError::server_error("Error creating a task", e))?;

    tracing::info!(
        task_id = task.id,
        project_id = task.project_id,
        requested_by = %auth.subject_id,
        "Created task"
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// Moves a task to another board column
///
/// # Errors
///
/// - `404 Not Found`: No task with this id
/// - `500 Internal Server Error`: Update failed
pub async fn update_task_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i32>,
    Json(req): Json<UpdateTaskStatusRequest>,
) -> ApiResult<Json<Task>> {
    let task = Task::update_status(&state.db, task_id, req.status)
        .await
        .map_err(|e| ApiError::server_error("Error updating task", e))?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", task_id)))?;

    tracing::debug!(
        task_id,
        status = %task.status,
        requested_by = %auth.subject_id,
        "Updated task status"
    );
    Ok(Json(task))
}
