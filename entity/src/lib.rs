//! SeaORM entities backing the document store.
//!
//! Every business entity (sessions, clients, calendars, ...) is persisted as a JSON document
//! inside a single `document` table, partitioned by collection name.

pub mod document;
pub mod prelude;
