//! MediaHub backend: read-only listings of users, media, documents and
//! support messages, served over API Gateway events or plain HTTP.

pub mod config;
pub mod controllers;
pub mod db;
pub mod handler;
pub mod models;
pub mod router;

use handler::{DatabaseConnector, Handler};

/// Shared state for the HTTP server
pub struct AppState {
    pub handler: Handler<DatabaseConnector>,
}
