//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Authentication** (`/api/auth/*`): login and an unauthenticated health
//!   probe
//! - **Inventory** (`/api/inventory/*`): branch-scoped device listings and
//!   the acknowledge/reject status transitions

pub mod handlers;
pub mod models;
