//! Factory methods for creating test data.
//!
//! This module provides factory methods for inserting documents with sensible defaults,
//! reducing boilerplate in tests. Documents are written straight into the `document`
//! table with the same JSON layout the application uses.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let client = factory::client::create_client(&db).await?;
//! let session = factory::session::SessionFactory::new(&db)
//!     .capacity(1)
//!     .enrolled(vec![client.id.clone()])
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `client` - Clients
//! - `session` - Gym sessions
//! - `membership` - Memberships
//! - `calendar` - Room calendars
//! - `reservation` - Reservations
//! - `catalog` - Services, rooms and instructors
//! - `helpers` - ID generation, raw inserts and entities with dependencies

pub mod calendar;
pub mod catalog;
pub mod client;
pub mod helpers;
pub mod membership;
pub mod reservation;
pub mod session;

pub use client::create_client;
pub use helpers::{create_eligible_client, insert_document};
pub use session::create_session;
