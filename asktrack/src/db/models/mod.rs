//! Database record models matching table schemas.
//!
//! - [`installers`]: rows of the `installers` table (credentials database)
//! - [`devices`]: rows of the `user_info` table (inventory database) and the
//!   [`devices::DeviceStatus`] enum over its tri-state flag

pub mod devices;
pub mod installers;
