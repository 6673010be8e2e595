//! Read operations - extends Database with listing methods
//!
//! Each module adds `impl Database` blocks for a group of tables.

mod listings; // users, media_items, documents, support_messages

pub use listings::Row;
