//! API request/response models for the device inventory.

use serde::{Deserialize, Serialize};

use crate::db::models::devices::{Device, DeviceStatus};

/// One device as it appears on the wire.
///
/// `isinstalled` keeps the tri-state flag shape of the upstream contract:
/// null = pending, false = processing, true = rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub device_id: String,
    pub group_account: String,
    pub phone_number: String,
    pub isinstalled: Option<bool>,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            device_id: device.device_id,
            group_account: device.group_account,
            phone_number: device.phone_number,
            isinstalled: device.isinstalled,
        }
    }
}

/// Per-status counts over one branch's devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusSummary {
    pub pending: usize,
    pub processing: usize,
    pub rejected: usize,
}

impl StatusSummary {
    pub fn tally(devices: &[Device]) -> Self {
        let mut summary = Self::default();
        for device in devices {
            match device.status() {
                DeviceStatus::Pending => summary.pending += 1,
                DeviceStatus::Processing => summary.processing += 1,
                DeviceStatus::Rejected => summary.rejected += 1,
            }
        }
        summary
    }
}

/// Branch inventory listing.
///
/// The authenticated variant includes `statusSummary`; the by-name variant
/// omits it, matching the upstream response shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub branch: String,
    pub device_count: usize,
    pub devices: Vec<DeviceResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_summary: Option<StatusSummary>,
}

/// Result of an acknowledge/reject transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActionResponse {
    pub message: String,
    pub device_id: String,
    pub new_status: String,
}
