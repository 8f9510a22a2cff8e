/// User model and database operations
///
/// Users are mirrored from the identity provider: the first time a principal
/// signs in, the client creates a row keyed by the provider's subject id.
/// Rows are never deleted by the sign-in flows.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id SERIAL PRIMARY KEY,
///     subject_id VARCHAR(255) NOT NULL,
///     username VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     profile_picture_url VARCHAR(512),
///     team_id INTEGER REFERENCES teams(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_subject_id_key UNIQUE (subject_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{User, CreateUser};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     subject_id: "0b6c2f1e-7f7d-4d0e-9d8e-1c2a3b4c5d6e".to_string(),
///     username: "jdoe".to_string(),
///     email: "jdoe@example.com".to_string(),
///     profile_picture_url: Some("i1.jpg".to_string()),
///     team_id: Some(1),
/// }).await?;
///
/// let found = User::find_by_subject_id(&pool, &user.subject_id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Name of the uniqueness constraint on `users.subject_id`
pub const SUBJECT_ID_CONSTRAINT: &str = "users_subject_id_key";

/// Application user linked to an identity-provider principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Local user ID
    pub user_id: i32,

    /// Subject identifier issued by the identity provider
    ///
    /// Unique and immutable once written.
    pub subject_id: String,

    /// Display/login name
    pub username: String,

    /// Email address reported by the identity provider
    pub email: String,

    /// Profile picture reference (file name or URL)
    pub profile_picture_url: Option<String>,

    /// Team this user belongs to
    pub team_id: Option<i32>,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub subject_id: String,
    pub username: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
    pub team_id: Option<i32>,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Returns a database error if the subject id is already taken
    /// (`users_subject_id_key`), the team does not exist, or the
    /// connection fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (subject_id, username, email, profile_picture_url, team_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, subject_id, username, email, profile_picture_url,
                      team_id, created_at
            "#,
        )
        .bind(data.subject_id)
        .bind(data.username)
        .bind(data.email)
        .bind(data.profile_picture_url)
        .bind(data.team_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by the identity provider's subject id
    pub async fn find_by_subject_id(
        pool: &PgPool,
        subject_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, subject_id, username, email, profile_picture_url,
                   team_id, created_at
            FROM users
            WHERE subject_id = $1
            "#,
        )
        .bind(subject_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by local id
    pub async fn find_by_id(pool: &PgPool, user_id: i32) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, subject_id, username, email, profile_picture_url,
                   team_id, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, subject_id, username, email, profile_picture_url,
                   team_id, created_at
            FROM users
            ORDER BY user_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}
