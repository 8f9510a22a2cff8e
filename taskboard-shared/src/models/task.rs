/// Task model and database operations
///
/// Tasks belong to exactly one project and are written by one author. The
/// project and author references are enforced by foreign keys; handlers do
/// not check them up front.
///
/// # Workflow
///
/// ```text
/// To Do → In Progress → Under Review → Completed
/// ```
///
/// Any status may be set directly; the board lets users drag cards between
/// columns in either direction.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('To Do', 'In Progress', 'Under Review', 'Completed');
/// CREATE TYPE task_priority AS ENUM ('Urgent', 'High', 'Medium', 'Low', 'Backlog');
///
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'To Do',
///     priority task_priority NOT NULL DEFAULT 'Backlog',
///     tags TEXT,
///     start_date TIMESTAMPTZ,
///     due_date TIMESTAMPTZ,
///     points INTEGER,
///     project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     author_user_id INTEGER NOT NULL REFERENCES users(user_id),
///     assigned_user_id INTEGER REFERENCES users(user_id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Write release notes".to_string(),
///     status: TaskStatus::ToDo,
///     priority: TaskPriority::High,
///     project_id: 1,
///     author_user_id: 1,
///     ..Default::default()
/// }).await?;
///
/// Task::update_status(&pool, task.id, TaskStatus::InProgress).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

/// Board column a task sits in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[default]
    #[sqlx(rename = "To Do")]
    #[serde(rename = "To Do")]
    ToDo,

    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    #[sqlx(rename = "Under Review")]
    #[serde(rename = "Under Review")]
    UnderReview,

    Completed,
}

impl TaskStatus {
    /// Label as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::UnderReview => "Under Review",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    Urgent,
    High,
    Medium,
    Low,
    #[default]
    Backlog,
}

impl TaskPriority {
    /// Label as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Urgent => "Urgent",
            TaskPriority::High => "High",
            TaskPriority::Medium => "Medium",
            TaskPriority::Low => "Low",
            TaskPriority::Backlog => "Backlog",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task on a project board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task ID
    pub id: i32,

    /// Short title shown on cards and timeline bars
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Board column
    pub status: TaskStatus,

    /// Urgency
    pub priority: TaskPriority,

    /// Free-text, comma separated tags
    pub tags: Option<String>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Planned due date
    pub due_date: Option<DateTime<Utc>>,

    /// Estimate on a 0..=10 scale, drives timeline progress
    pub points: Option<i32>,

    /// Owning project (required)
    pub project_id: i32,

    /// Author (required)
    pub author_user_id: i32,

    /// Assignee
    pub assigned_user_id: Option<i32>,
}

/// Input for creating a task
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tags: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<i32>,
    pub project_id: i32,
    pub author_user_id: i32,
    pub assigned_user_id: Option<i32>,
}

impl Task {
    /// Inserts a new task
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if the project or author does not
    /// exist, or a connection error.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, tags, start_date,
                               due_date, points, project_id, author_user_id, assigned_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, description, status, priority, tags, start_date,
                      due_date, points, project_id, author_user_id, assigned_user_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.tags)
        .bind(data.start_date)
        .bind(data.due_date)
        .bind(data.points)
        .bind(data.project_id)
        .bind(data.author_user_id)
        .bind(data.assigned_user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists the tasks of one project ordered by id
    pub async fn list_by_project(pool: &PgPool, project_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, tags, start_date,
                   due_date, points, project_id, author_user_id, assigned_user_id
            FROM tasks
            WHERE project_id = $1
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Moves a task to another board column
    ///
    /// Returns the updated task, or `None` if no task has this id.
    pub async fn update_status(
        pool: &PgPool,
        id: i32,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2
            WHERE id = $1
            RETURNING id, title, description, status, priority, tags, start_date,
                      due_date, points, project_id, author_user_id, assigned_user_id
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}
