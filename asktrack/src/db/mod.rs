//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the repository pattern: each table has a repository struct in
//! [`handlers`] that encapsulates its queries and returns record structs from
//! [`models`].
//!
//! The service talks to two separate datastores: the credentials database
//! (`installers`) and the inventory database (`user_info`). Each gets its own
//! connection pool and its own migration set; the repositories themselves are
//! pool-agnostic and borrow whatever connection or transaction the caller
//! holds.
//!
//! ```ignore
//! let mut tx = state.inventory_db.begin().await?;
//! let mut devices = Devices::new(&mut tx);
//! // ... read, conditional update ...
//! drop(devices);
//! tx.commit().await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
