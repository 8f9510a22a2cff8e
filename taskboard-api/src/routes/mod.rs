/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `projects`: Project listing and creation
/// - `users`: User lookup and creation for the sign-in sync
/// - `tasks`: Task listing, creation and status moves
/// - `teams`: Team listing

pub mod health;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;
