//! Repository implementations for database access.
//!
//! Each repository wraps a `&mut PgConnection` and provides strongly-typed
//! queries for one table:
//!
//! - [`Installers`]: credential lookups against the credentials database
//! - [`Devices`]: branch-scoped reads and guarded status transitions against
//!   the inventory database

pub mod devices;
pub mod installers;

pub use devices::Devices;
pub use installers::Installers;
