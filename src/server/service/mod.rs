//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Enrollment, waiting-list promotion, membership rules, rewards
//! - **Orchestration**: Coordinating several collections within one operation
//! - **Domain Models**: Working with typed `Stored<M>` documents rather than raw JSON

pub mod calendar;
pub mod client;
pub mod entity;
pub mod membership;
pub mod reservation;
pub mod reward;
pub mod session;
pub mod waiting_list;

#[cfg(test)]
mod test;
