/// Client session context
///
/// Holds the resolved application user together with the authentication
/// flag and loading/error status. The context is an explicit object the
/// caller owns and passes around; there is no process-wide session.

use crate::error::ClientResult;
use crate::identity::IdentityProvider;
use crate::sync::UserSyncService;
use serde::Serialize;
use std::sync::Arc;
use taskboard_shared::models::user::User;
use tokio::sync::RwLock;

/// Snapshot of the session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Session state shared by the client's views
pub struct SessionContext {
    identity: Arc<dyn IdentityProvider>,
    sync: UserSyncService,
    state: RwLock<UserState>,
}

impl SessionContext {
    pub fn new(identity: Arc<dyn IdentityProvider>, sync: UserSyncService) -> Self {
        Self {
            identity,
            sync,
            state: RwLock::new(UserState::default()),
        }
    }

    /// Current state snapshot
    pub async fn state(&self) -> UserState {
        self.state.read().await.clone()
    }

    /// Re-reads the session and syncs the user
    ///
    /// With a session the context is authenticated even if the sync fails;
    /// the failure is kept in `error`. Without one the state is cleared.
    pub async fn check_auth_status(&self) -> UserState {
        self.state.write().await.is_loading = true;

        let next = match self.identity.current_session().await {
            Ok(Some(_)) => match self.sync.try_sync().await {
                Ok(user) => UserState {
                    current_user: Some(user),
                    is_authenticated: true,
                    is_loading: false,
                    error: None,
                },
                Err(e) => {
                    tracing::error!(error = %e, "Error syncing user");
                    UserState {
                        current_user: None,
                        is_authenticated: true,
                        is_loading: false,
                        error: Some(e.to_string()),
                    }
                }
            },
            Ok(None) => UserState::default(),
            Err(e) => {
                tracing::error!(error = %e, "Error checking auth status");
                UserState {
                    error: Some(e.to_string()),
                    ..UserState::default()
                }
            }
        };

        let mut state = self.state.write().await;
        *state = next;
        state.clone()
    }

    /// Re-syncs the user of an authenticated session
    ///
    /// Returns the refreshed user; unauthenticated contexts are left alone.
    pub async fn refresh_user(&self) -> Option<User> {
        if !self.state.read().await.is_authenticated {
            return None;
        }

        self.state.write().await.is_loading = true;
        let user = self.sync.sync().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        if user.is_some() {
            state.current_user = user.clone();
            state.error = None;
        } else {
            state.error = Some("Failed to refresh user".to_string());
        }
        user
    }

    /// Signs out and clears the state
    ///
    /// # Errors
    ///
    /// Propagates identity provider failures; the state is left unchanged.
    pub async fn logout(&self) -> ClientResult<()> {
        if let Err(e) = self.identity.sign_out().await {
            tracing::error!(error = %e, "Error signing out");
            return Err(e);
        }

        *self.state.write().await = UserState::default();
        tracing::info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TaskboardApi;
    use crate::identity::StaticIdentityProvider;
    use crate::request::AuthenticatedClient;
    use crate::sync::SyncDefaults;
    use crate::testing::{session, user_json, MockTransport};
    use serde_json::json;

    fn context(identity: StaticIdentityProvider, transport: Arc<MockTransport>) -> SessionContext {
        let identity: Arc<dyn IdentityProvider> = Arc::new(identity);
        let client = AuthenticatedClient::new(identity.clone(), transport);
        let sync = UserSyncService::new(TaskboardApi::new(client, "http://api"), SyncDefaults::default());
        SessionContext::new(identity, sync)
    }

    #[tokio::test]
    async fn test_check_auth_status_signed_in() {
        let transport = Arc::new(MockTransport::always(200, user_json(5, "sub-1", "ana")));
        let ctx = context(
            StaticIdentityProvider::new(session("sub-1", "ana", Some("tok"))),
            transport,
        );

        let state = ctx.check_auth_status().await;
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.current_user.unwrap().user_id, 5);
        assert_eq!(ctx.state().await.error, None);
    }

    #[tokio::test]
    async fn test_check_auth_status_signed_out() {
        let transport = Arc::new(MockTransport::always(200, json!({})));
        let ctx = context(StaticIdentityProvider::signed_out(), transport.clone());

        assert_eq!(ctx.check_auth_status().await, UserState::default());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_sync_failure_keeps_session_authenticated() {
        let transport = Arc::new(MockTransport::always(
            500,
            json!({ "error": "server_error", "message": "boom" }),
        ));
        let ctx = context(
            StaticIdentityProvider::new(session("sub-1", "ana", Some("tok"))),
            transport,
        );

        let state = ctx.check_auth_status().await;
        assert!(state.is_authenticated);
        assert!(state.current_user.is_none());
        assert!(state.error.unwrap().contains("User sync failed"));
    }

    #[tokio::test]
    async fn test_refresh_and_logout() {
        let transport = Arc::new(MockTransport::always(200, user_json(5, "sub-1", "ana")));
        let ctx = context(
            StaticIdentityProvider::new(session("sub-1", "ana", Some("tok"))),
            transport,
        );

        assert!(ctx.refresh_user().await.is_none(), "not authenticated yet");

        ctx.check_auth_status().await;
        assert_eq!(ctx.refresh_user().await.unwrap().user_id, 5);

        ctx.logout().await.unwrap();
        assert_eq!(ctx.state().await, UserState::default());
        assert_eq!(ctx.check_auth_status().await, UserState::default());
    }
}
