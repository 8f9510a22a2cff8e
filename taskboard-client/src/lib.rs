//! # Taskboard Client Library
//!
//! Client side of the Taskboard API: signs requests with the identity
//! provider's token, links the signed-in principal to an application user
//! and prepares data for the board views.
//!
//! ## Modules
//!
//! - `identity`: Identity provider seam and sessions
//! - `transport`: HTTP transport seam
//! - `request`: Authenticated-request helper
//! - `api`: Typed API client
//! - `sync`: User sync on sign-in
//! - `session`: Session context (current user, auth and loading state)
//! - `timeline`: Gantt bar normalization
//! - `forms`: New task/project form validation
//! - `config`: Environment configuration
//! - `error`: Client error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard_client::{
//!     api::TaskboardApi, identity::TokenIdentityProvider, request::AuthenticatedClient,
//!     sync::{SyncDefaults, UserSyncService}, transport::ReqwestTransport,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = Arc::new(TokenIdentityProvider::new(Some("eyJ...".to_string()), "secret"));
//! let client = AuthenticatedClient::new(identity, Arc::new(ReqwestTransport::new()?));
//! let sync = UserSyncService::new(TaskboardApi::new(client, "http://localhost:3001"), SyncDefaults::default());
//!
//! if let Some(user) = sync.sync().await {
//!     println!("Signed in as {}", user.username);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod identity;
pub mod request;
pub mod session;
pub mod sync;
pub mod timeline;
pub mod transport;

#[cfg(test)]
mod testing;
