//! HTTP request handlers.
//!
//! `crud` holds the generic `get`/`create`/`update`/`delete` handlers mounted for every
//! collection. The other modules hold the named business endpoints of each resource
//! group. Handlers only extract input, call a service and shape the response.

pub mod calendar;
pub mod client;
pub mod crud;
pub mod membership;
pub mod reservation;
pub mod room;
pub mod session;

#[cfg(test)]
mod test;
