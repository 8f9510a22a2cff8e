/// Middleware modules for the API server
///
/// Bearer-token authentication lives in `app` since it needs `AppState`.

pub mod security;
