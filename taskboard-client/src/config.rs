/// Client configuration
///
/// Built with the `config` crate from defaults overlaid by environment
/// variables prefixed `TASKBOARD_` (a `.env` file is read first when present).
///
/// # Environment Variables
///
/// - `TASKBOARD_API_BASE_URL`: API server (default: http://localhost:3001)
/// - `TASKBOARD_IDENTITY_POOL_ID`: Identity provider pool (required)
/// - `TASKBOARD_IDENTITY_CLIENT_ID`: Identity provider app client (required)
/// - `TASKBOARD_DEFAULT_TEAM_ID`: Team for users created on sign-in (default: 1)
/// - `TASKBOARD_DEFAULT_PROFILE_PICTURE`: Picture for new users (default: i1.jpg)
/// - `TASKBOARD_PROJECT_SPAN_DAYS`: Project bar length without end date, in
///   days, at least 1 (default: 30)
/// - `TASKBOARD_ACCESS_TOKEN`: Identity token of the signed-in principal
/// - `TASKBOARD_IDENTITY_SECRET`: Secret identity tokens are verified with
///
/// Nothing sensitive has a default.

use crate::error::{ClientError, ClientResult, FieldError};
use crate::sync::SyncDefaults;
use crate::timeline::ProjectSpan;
use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

const ENV_PREFIX: &str = "TASKBOARD";

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub identity_pool_id: String,
    pub identity_client_id: String,
    pub default_team_id: i32,
    pub default_profile_picture: String,
    pub project_span_days: i64,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub identity_secret: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit variable map instead of the
    /// process environment
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api_base_url", "http://localhost:3001")?
            .set_default("identity_pool_id", "")?
            .set_default("identity_client_id", "")?
            .set_default("default_team_id", 1)?
            .set_default("default_profile_picture", "i1.jpg")?
            .set_default("project_span_days", 30)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Checks that every required setting is present and the project span
    /// is positive
    ///
    /// # Errors
    ///
    /// `ClientError::Validation` naming every offending variable.
    pub fn validate(&self) -> ClientResult<()> {
        let required = [
            ("TASKBOARD_API_BASE_URL", &self.api_base_url),
            ("TASKBOARD_IDENTITY_POOL_ID", &self.identity_pool_id),
            ("TASKBOARD_IDENTITY_CLIENT_ID", &self.identity_client_id),
        ];

        let mut errors: Vec<FieldError> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| FieldError::new(*name, "Missing required environment variable"))
            .collect();

        if self.project_span_days <= 0 {
            errors.push(FieldError::new(
                "TASKBOARD_PROJECT_SPAN_DAYS",
                "Project span must be at least one day",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(errors))
        }
    }

    pub fn sync_defaults(&self) -> SyncDefaults {
        SyncDefaults {
            team_id: self.default_team_id,
            profile_picture: self.default_profile_picture.clone(),
        }
    }

    pub fn project_span(&self) -> ProjectSpan {
        match self.project_span_days {
            7 => ProjectSpan::Week,
            30 => ProjectSpan::Month,
            days => ProjectSpan::Days(days),
        }
    }
}
