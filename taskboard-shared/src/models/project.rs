/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     start_date TIMESTAMPTZ,
///     end_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Start and end are independently optional: a project may have an end date
/// without a start date and vice versa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Name of the primary key constraint on `projects`
pub const PRIMARY_KEY_CONSTRAINT: &str = "projects_pkey";

/// Project grouping a set of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project ID
    pub id: i32,

    /// Project name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Planned end
    pub end_date: Option<DateTime<Utc>>,
}

/// Input for creating a project
#[derive(Debug, Clone, Default)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Project {
    /// Inserts a new project
    ///
    /// Takes the input by reference so callers can retry the insert.
    pub async fn create(pool: &PgPool, data: &CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, start_date, end_date
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, start_date, end_date
            FROM projects
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Deletes a project and, by cascade, its tasks
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
