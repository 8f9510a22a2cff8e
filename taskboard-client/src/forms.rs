/// Form validation for new tasks and projects
///
/// Forms hold raw user input (everything is a string, as typed). Validation
/// collects every field error at once and, on success, produces the JSON
/// payload the API expects.

use crate::error::{ClientError, ClientResult, FieldError};
use chrono::SecondsFormat;
use serde::Serialize;
use taskboard_shared::dates::parse_timestamp;
use taskboard_shared::models::task::{TaskPriority, TaskStatus};

/// Payload for `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tags: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub points: Option<i32>,
    pub project_id: i32,
    pub author_user_id: i32,
    pub assigned_user_id: Option<i32>,
}

/// Payload for `POST /projects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// New-task form input
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub tags: String,
    pub start_date: String,
    pub due_date: String,
    pub points: Option<i32>,
    pub author_user_id: String,

    /// Optional; must be numeric when given
    pub assigned_user_id: String,

    /// Used when the form is not opened from a project page
    pub project_id: String,
}

impl TaskForm {
    /// Validates the form into a task payload
    ///
    /// `context_project_id` is the project the form was opened from; it
    /// takes precedence over the form's own project field.
    ///
    /// # Errors
    ///
    /// `ClientError::Validation` listing every failing field.
    pub fn validate_into(self, context_project_id: Option<i32>) -> ClientResult<NewTask> {
        let mut errors = Vec::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }

        let author_user_id = required_id(&self.author_user_id, "authorUserId", "Author", &mut errors);

        let project_id = match context_project_id {
            Some(id) => Some(id),
            None => required_id(&self.project_id, "projectId", "Project", &mut errors),
        };

        let assigned_user_id = match non_blank(&self.assigned_user_id) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new(
                        "assignedUserId",
                        "Assignee id must be a number",
                    ));
                    None
                }
            },
        };

        let start_date = optional_date(&self.start_date, "startDate", &mut errors);
        let due_date = optional_date(&self.due_date, "dueDate", &mut errors);

        if let Some(points) = self.points {
            if !(0..=10).contains(&points) {
                errors.push(FieldError::new("points", "Points must be between 0 and 10"));
            }
        }

        match (author_user_id, project_id) {
            (Some(author_user_id), Some(project_id)) if errors.is_empty() => Ok(NewTask {
                title,
                description: non_blank(&self.description).map(str::to_string),
                status: self.status.unwrap_or_default(),
                priority: self.priority.unwrap_or_default(),
                tags: non_blank(&self.tags).map(str::to_string),
                start_date,
                due_date,
                points: self.points,
                project_id,
                author_user_id,
                assigned_user_id,
            }),
            _ => Err(ClientError::Validation(errors)),
        }
    }
}

/// New-project form input
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

impl ProjectForm {
    /// Validates the form into a project payload
    pub fn validate_into(self) -> ClientResult<NewProject> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Project name is required"));
        }

        let start_date = optional_date(&self.start_date, "startDate", &mut errors);
        let end_date = optional_date(&self.end_date, "endDate", &mut errors);

        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }

        Ok(NewProject {
            name,
            description: non_blank(&self.description).map(str::to_string),
            start_date,
            end_date,
        })
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn required_id(raw: &str, field: &str, label: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    match non_blank(raw) {
        None => {
            errors.push(FieldError::new(field, format!("{} id is required", label)));
            None
        }
        Some(value) => match value.parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new(field, format!("{} id must be a number", label)));
                None
            }
        },
    }
}

/// Parses a date field and formats it as RFC 3339 (`2024-01-01T00:00:00Z`)
fn optional_date(raw: &str, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = non_blank(raw)?;
    match parse_timestamp(value) {
        Ok(ts) => Some(ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        Err(e) => {
            errors.push(FieldError::new(field, e.to_string()));
            None
        }
    }
}
