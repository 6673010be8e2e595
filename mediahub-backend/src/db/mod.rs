//! Database backends
//!
//! `DATABASE_URL` picks the engine: `postgres://` / `postgresql://` go to
//! `PgDatabase`, anything else is a SQLite path or `sqlite:` URL.

pub mod pg_value;
mod postgres;
pub mod row_json;
mod sqlite;
mod tables;

use thiserror::Error;

pub use postgres::{PgDatabase, is_postgres_url};
pub use sqlite::Database;
pub use tables::Row;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),
}
