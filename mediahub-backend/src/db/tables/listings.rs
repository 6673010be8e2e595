//! Listing queries over the content tables

use rusqlite::{Result as SqliteResult, Statement};
use serde_json::{Map, Value};

use crate::db::Database;
use crate::db::row_json::ColumnKind;
use crate::models::Listing;

/// One table row as a JSON object, keys in column order
pub type Row = Map<String, Value>;

impl Database {
    /// Run the listing's query and convert every row. This is the only
    /// statement executed; column kinds come from the prepared statement.
    pub fn list(&self, listing: Listing) -> SqliteResult<Vec<Row>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(listing.query())?;
        let columns = column_kinds(&stmt);

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = Row::with_capacity(columns.len());
            for (idx, (name, kind)) in columns.iter().enumerate() {
                object.insert(name.clone(), kind.to_json(row.get_ref(idx)?));
            }
            out.push(object);
        }

        Ok(out)
    }
}

/// Result columns of a prepared statement with their declared kinds
fn column_kinds(stmt: &Statement<'_>) -> Vec<(String, ColumnKind)> {
    stmt.columns()
        .iter()
        .map(|column| {
            let kind = ColumnKind::from_decl_type(column.decl_type().unwrap_or(""));
            (column.name().to_string(), kind)
        })
        .collect()
}
