/// Identity provider seam
///
/// The hosted identity provider is an opaque collaborator: it tells us who
/// is signed in and hands out the bearer token for API calls. The rest of
/// the client only sees [`IdentityProvider`].
///
/// Two implementations ship with the crate:
///
/// - [`TokenIdentityProvider`] reads the principal out of an identity token
///   (the JWT the API server also verifies).
/// - [`StaticIdentityProvider`] holds a fixed session; handy for tests and
///   embedding.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskboard_shared::auth::jwt::{validate_token, JwtError};
use tokio::sync::RwLock;

/// The signed-in principal as the identity provider reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub username: String,

    /// Stable subject identifier, the key users are linked by
    pub subject_id: String,

    /// Sign-in email
    pub email: String,
}

/// Current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for API calls, when the provider issued one
    pub access_token: Option<String>,

    pub principal: Principal,
}

/// Source of the current session
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current session, or `None` when nobody is signed in
    async fn current_session(&self) -> ClientResult<Option<Session>>;

    /// Ends the current session
    async fn sign_out(&self) -> ClientResult<()>;
}

/// Identity provider holding a fixed session
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    session: RwLock<Option<Session>>,
}

impl StaticIdentityProvider {
    /// Provider with someone signed in
    pub fn new(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    /// Provider with nobody signed in
    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_session(&self) -> ClientResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_out(&self) -> ClientResult<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

/// Identity provider backed by a signed identity token
///
/// The token is verified with the shared secret before its claims are
/// trusted. An expired token reads as "signed out".
pub struct TokenIdentityProvider {
    token: RwLock<Option<String>>,
    secret: String,
}

impl TokenIdentityProvider {
    pub fn new(token: Option<String>, secret: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(token),
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    async fn current_session(&self) -> ClientResult<Option<Session>> {
        let guard = self.token.read().await;
        let Some(token) = guard.as_deref() else {
            return Ok(None);
        };

        match validate_token(token, &self.secret) {
            Ok(claims) => Ok(Some(Session {
                access_token: Some(token.to_string()),
                principal: Principal {
                    username: claims.username,
                    subject_id: claims.sub,
                    email: claims.email,
                },
            })),
            Err(JwtError::Expired) => {
                tracing::info!("Identity token expired; treating as signed out");
                Ok(None)
            }
            Err(e) => Err(ClientError::Identity(e.to_string())),
        }
    }

    async fn sign_out(&self) -> ClientResult<()> {
        *self.token.write().await = None;
        Ok(())
    }
}
