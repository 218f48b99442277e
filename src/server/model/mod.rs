//! Server-side domain models.
//!
//! Every business entity is stored as a JSON document. The types here give those documents
//! a typed shape for the service layer and bind each one to its collection through
//! `DocumentModel`. Query types describe filters and projections accepted by the generic
//! `get` endpoints.

pub mod calendar;
pub mod catalog;
pub mod client;
pub mod document;
pub mod membership;
pub mod query;
pub mod reservation;
pub mod session;
