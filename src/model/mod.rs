//! Request and response types of the HTTP API.
//!
//! Entity documents themselves are returned as JSON objects; the types here cover the
//! bodies and query strings of the named business endpoints.

pub mod api;
pub mod calendar;
pub mod client;
pub mod membership;
pub mod reservation;
pub mod session;
