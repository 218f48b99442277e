//! Server-side API backend and business logic.
//!
//! This module contains the complete backend: HTTP endpoints, business logic, data access
//! and infrastructure. The backend uses Axum as the web framework and SeaORM for database
//! operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Business logic: enrollment, waiting lists, calendars,
//!   memberships and rewards
//! - **Data Layer** (`data/`) - Document persistence with version-checked writes
//! - **Model Layer** (`model/`) - Typed documents, filters and projections
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB pool, session locks, filter strategy)
//! - **Startup** (`startup`) - Database, tracing, CORS and shutdown setup
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Controller** extracts and converts input, calls service
//! 3. **Service** executes business logic, orchestrates document reads and writes
//! 4. **Data** queries database, converts rows to documents
//! 5. **Controller** serializes the result, or `AppError` maps the failure to a status code

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
