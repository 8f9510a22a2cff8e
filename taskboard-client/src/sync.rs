/// User sync
///
/// Links the signed-in principal to an application user, creating the user
/// on first sign-in.
///
/// # Flow
///
/// ```text
/// try_sync()
///   ├─> identity: current principal     (none → NoSession)
///   ├─> GET /users/{subjectId}
///   │     ├─> 200 → user
///   │     └─> 404 → POST /users { default team, default picture }
///   │                 ├─> 201 → created user
///   │                 └─> 409 → someone else created it; GET once more
///   └─> any other status → SyncFailure
/// ```
///
/// [`UserSyncService::sync`] is the outermost call site: it logs any error and
/// returns `None`.

use crate::api::TaskboardApi;
use crate::error::{ClientError, ClientResult};
use crate::identity::{IdentityProvider, Principal};
use std::sync::Arc;
use taskboard_shared::models::user::{CreateUser, User};

/// Defaults applied to users created on first sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDefaults {
    pub team_id: i32,
    pub profile_picture: String,
}

impl Default for SyncDefaults {
    fn default() -> Self {
        Self {
            team_id: 1,
            profile_picture: "i1.jpg".to_string(),
        }
    }
}

/// Resolves or creates the application user for the signed-in principal
#[derive(Clone)]
pub struct UserSyncService {
    api: TaskboardApi,
    identity: Arc<dyn IdentityProvider>,
    defaults: SyncDefaults,
}

impl UserSyncService {
    pub fn new(api: TaskboardApi, defaults: SyncDefaults) -> Self {
        let identity = api.client().identity().clone();
        Self {
            api,
            identity,
            defaults,
        }
    }

    /// The signed-in principal
    ///
    /// # Errors
    ///
    /// `NoSession` when nobody is signed in.
    pub async fn current_principal(&self) -> ClientResult<Principal> {
        self.identity
            .current_session()
            .await?
            .map(|session| session.principal)
            .ok_or(ClientError::NoSession)
    }

    /// Returns the user linked to `principal`, creating it if absent
    ///
    /// # Errors
    ///
    /// - `SyncFailure` for any unexpected API status
    /// - `MissingToken` / `AuthenticationFailed` from the request helper
    pub async fn ensure_user(&self, principal: &Principal) -> ClientResult<User> {
        if let Some(user) = self.lookup(&principal.subject_id).await? {
            tracing::debug!(user_id = user.user_id, "Found existing user");
            return Ok(user);
        }

        tracing::info!(subject_id = %principal.subject_id, "No user for principal, creating one");
        let new_user = CreateUser {
            subject_id: principal.subject_id.clone(),
            username: principal.username.clone(),
            email: principal.email.clone(),
            profile_picture_url: Some(self.defaults.profile_picture.clone()),
            team_id: Some(self.defaults.team_id),
        };

        match self.api.create_user(&new_user).await {
            Ok(user) => Ok(user),
            Err(ClientError::Server { status: 409, .. }) => {
                tracing::info!(subject_id = %principal.subject_id, "User created concurrently, re-reading");
                self.lookup(&principal.subject_id).await?.ok_or_else(|| {
                    ClientError::SyncFailure(
                        "User creation conflicted but the user could not be found".to_string(),
                    )
                })
            }
            Err(e) => Err(as_sync_failure(e)),
        }
    }

    /// Full sync for the current principal with a structured error
    pub async fn try_sync(&self) -> ClientResult<User> {
        let principal = self.current_principal().await?;
        self.ensure_user(&principal).await
    }

    /// Full sync; errors are logged and reported as `None`
    pub async fn sync(&self) -> Option<User> {
        match self.try_sync().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!(error = %e, "Error syncing user");
                None
            }
        }
    }

    async fn lookup(&self, subject_id: &str) -> ClientResult<Option<User>> {
        self.api.find_user(subject_id).await.map_err(as_sync_failure)
    }
}

fn as_sync_failure(err: ClientError) -> ClientError {
    match err {
        ClientError::Server { status, message } => {
            ClientError::SyncFailure(format!("HTTP {}: {}", status, message))
        }
        other => other,
    }
}
