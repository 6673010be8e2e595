//! Postgres database - connection management and listing
//!
//! Same lifecycle as the SQLite `Database`: one client per invocation,
//! closed when dropped. The listing statement is sent as-is and every
//! column is decoded through `PgJson`.

use tokio_postgres::{Client, NoTls};

use crate::db::Row;
use crate::db::pg_value::PgJson;
use crate::models::Listing;

pub struct PgDatabase {
    client: Client,
    host: String,
}

impl PgDatabase {
    pub async fn open(database_url: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls).await?;
        let host = display_host(database_url);

        // The connection task ends once the client is dropped
        let task_host = host.clone();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("Postgres connection to {} failed: {}", task_host, e);
            }
        });
        log::debug!("Opened database connection to {}", host);

        Ok(Self { client, host })
    }

    pub async fn list(&self, listing: Listing) -> Result<Vec<Row>, tokio_postgres::Error> {
        let rows = self.client.query(listing.query(), &[]).await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut object = Row::with_capacity(row.columns().len());
            for (idx, column) in row.columns().iter().enumerate() {
                let PgJson(value) = row.try_get(idx)?;
                object.insert(column.name().to_string(), value);
            }
            out.push(object);
        }

        Ok(out)
    }
}

impl Drop for PgDatabase {
    fn drop(&mut self) {
        log::debug!("Closing database connection to {}", self.host);
    }
}

pub fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

/// Host and database name only; credentials stay out of the logs
fn display_host(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(parsed) => format!(
            "{}{}",
            parsed.host_str().unwrap_or("localhost"),
            parsed.path()
        ),
        Err(_) => "postgres".to_string(),
    }
}
