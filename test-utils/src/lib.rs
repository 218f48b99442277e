//! Gym Manager Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the gym
//! manager backend. This crate offers a builder pattern for creating test contexts with
//! in-memory SQLite databases, plus factories inserting realistic documents.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and setup
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_session_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_document_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let client = factory::client::create_client(db).await?;
//!     // Perform service operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
