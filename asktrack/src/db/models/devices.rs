//! Database record model for inventory devices.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a device record.
///
/// The `user_info` table stores this as a nullable boolean (`isinstalled`):
/// NULL = pending, FALSE = processing, TRUE = rejected. The nullable flag
/// only exists at the storage and wire boundaries; everything in between
/// works with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Pending,
    Processing,
    Rejected,
}

impl DeviceStatus {
    /// Decode the tri-state column value.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => DeviceStatus::Pending,
            Some(false) => DeviceStatus::Processing,
            Some(true) => DeviceStatus::Rejected,
        }
    }

    /// Encode back to the tri-state column value.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            DeviceStatus::Pending => None,
            DeviceStatus::Processing => Some(false),
            DeviceStatus::Rejected => Some(true),
        }
    }

    /// Display label used in API messages ("Pending", "Processing", "Rejected").
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Pending => "Pending",
            DeviceStatus::Processing => "Processing",
            DeviceStatus::Rejected => "Rejected",
        }
    }
}

/// A row of the `user_info` table (inventory database).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub device_id: String,
    pub group_account: String,
    pub phone_number: String,
    pub isinstalled: Option<bool>,
}

impl Device {
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus::from_flag(self.isinstalled)
    }
}
