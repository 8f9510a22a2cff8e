/// Team model
///
/// Teams are seeded by migrations; the sign-in flow assigns new users to
/// team 1.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE teams (
///     id SERIAL PRIMARY KEY,
///     team_name VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Team referenced by users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team ID
    pub id: i32,

    /// Display name
    pub team_name: String,
}

impl Team {
    /// Lists all teams ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let teams = sqlx::query_as::<_, Team>("SELECT id, team_name FROM teams ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(teams)
    }

    /// Finds a team by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>("SELECT id, team_name FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(team)
    }
}
