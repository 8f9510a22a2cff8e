//! # Taskboard Shared Library
//!
//! Types and persistence shared by the Taskboard API server and client.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `db`: Connection pool and migrations
//! - `auth`: Identity tokens and request authentication
//! - `dates`: Timestamp parsing used on both sides of the wire

pub mod auth;
pub mod dates;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
