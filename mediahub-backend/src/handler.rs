//! Request router/responder
//!
//! Turns one `ApiEvent` into one `ApiResponse`. Routing is decided first
//! without I/O; preflight requests never touch the database. Every other
//! invocation opens exactly one connection, which is dropped before
//! `handle` returns on every path.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use crate::db::{Database, DbError, PgDatabase, Row, is_postgres_url};
use crate::models::{ApiEvent, ApiResponse, Listing};
use crate::router::Route;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbError),
    #[error("failed to list {table}: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: DbError,
    },
    #[error("failed to serialize rows: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Something rows can be fetched from for the lifetime of one invocation
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch(&self, listing: Listing) -> Result<Vec<Row>, HandlerError>;
}

/// Opens a fresh `RowSource` per invocation
#[async_trait]
pub trait Connector: Send + Sync {
    type Source: RowSource;

    async fn connect(&self) -> Result<Self::Source, HandlerError>;
}

fn query_error(listing: Listing, source: impl Into<DbError>) -> HandlerError {
    HandlerError::Query {
        table: listing.table(),
        source: source.into(),
    }
}

#[async_trait]
impl RowSource for Database {
    async fn fetch(&self, listing: Listing) -> Result<Vec<Row>, HandlerError> {
        self.list(listing).map_err(|e| query_error(listing, e))
    }
}

#[async_trait]
impl RowSource for PgDatabase {
    async fn fetch(&self, listing: Listing) -> Result<Vec<Row>, HandlerError> {
        self.list(listing).await.map_err(|e| query_error(listing, e))
    }
}

#[derive(Debug, Clone)]
pub struct SqliteConnector {
    database_url: String,
}

impl SqliteConnector {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    type Source = Database;

    async fn connect(&self) -> Result<Database, HandlerError> {
        Database::open(&self.database_url).map_err(|e| HandlerError::Connect(e.into()))
    }
}

#[derive(Debug, Clone)]
pub struct PgConnector {
    database_url: String,
}

impl PgConnector {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Source = PgDatabase;

    async fn connect(&self) -> Result<PgDatabase, HandlerError> {
        PgDatabase::open(&self.database_url)
            .await
            .map_err(|e| HandlerError::Connect(e.into()))
    }
}

/// Backend chosen from the scheme of `DATABASE_URL`
#[derive(Debug, Clone)]
pub enum DatabaseConnector {
    Sqlite(SqliteConnector),
    Postgres(PgConnector),
}

impl DatabaseConnector {
    pub fn from_url(database_url: &str) -> Self {
        if is_postgres_url(database_url) {
            Self::Postgres(PgConnector::new(database_url))
        } else {
            Self::Sqlite(SqliteConnector::new(database_url))
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
        }
    }
}

pub enum AnySource {
    Sqlite(Database),
    Postgres(PgDatabase),
}

#[async_trait]
impl RowSource for AnySource {
    async fn fetch(&self, listing: Listing) -> Result<Vec<Row>, HandlerError> {
        match self {
            Self::Sqlite(db) => db.fetch(listing).await,
            Self::Postgres(db) => db.fetch(listing).await,
        }
    }
}

#[async_trait]
impl Connector for DatabaseConnector {
    type Source = AnySource;

    async fn connect(&self) -> Result<AnySource, HandlerError> {
        match self {
            Self::Sqlite(c) => c.connect().await.map(AnySource::Sqlite),
            Self::Postgres(c) => c.connect().await.map(AnySource::Postgres),
        }
    }
}

pub struct Handler<C: Connector> {
    connector: C,
}

impl Handler<DatabaseConnector> {
    pub fn from_config(config: &Config) -> Self {
        let connector = DatabaseConnector::from_url(&config.database_url);
        log::info!("Using {} database backend", connector.backend());
        Self::new(connector)
    }

    pub fn backend(&self) -> &'static str {
        self.connector.backend()
    }
}

impl<C: Connector> Handler<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub async fn handle(&self, event: &ApiEvent) -> ApiResponse {
        let route = Route::from_event(event);
        log::debug!(
            "{} action={:?} -> {:?}",
            event.http_method,
            event.query_param("action"),
            route
        );

        if route == Route::Preflight {
            return ApiResponse::preflight();
        }

        match self.respond(route).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Request failed: {}", e);
                ApiResponse::internal_error()
            }
        }
    }

    async fn respond(&self, route: Route) -> Result<ApiResponse, HandlerError> {
        let source = self.connector.connect().await?;

        match route {
            Route::List(listing) => {
                let rows = source.fetch(listing).await?;
                log::debug!("Listed {} rows from {}", rows.len(), listing.table());
                Ok(ApiResponse::json(200, serde_json::to_string(&rows)?))
            }
            Route::NotFound | Route::Preflight => Ok(ApiResponse::not_found()),
        }
    }
}
