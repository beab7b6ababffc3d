use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::models::inventory::{DeviceActionResponse, InventoryResponse, StatusSummary},
    auth::current_installer::BranchScope,
    db::{handlers::Devices, models::devices::DeviceStatus},
    errors::Error,
};

fn already(status: DeviceStatus) -> Error {
    Error::Conflict {
        message: format!("Device is already {}.", status.label()),
    }
}

fn device_not_found(device_id: String) -> Error {
    Error::NotFound {
        resource: "Device".to_string(),
        id: device_id,
    }
}

/// List the caller's branch inventory, with a per-status summary.
#[tracing::instrument(skip_all, fields(branch = %scope.branch))]
pub async fn get_inventory(State(state): State<AppState>, scope: BranchScope) -> Result<Json<InventoryResponse>, Error> {
    let mut conn = state.inventory_db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Devices::new(&mut conn);

    let devices = repo.list_by_branch(&scope.branch).await?;
    let summary = StatusSummary::tally(&devices);

    tracing::info!(
        count = devices.len(),
        pending = summary.pending,
        processing = summary.processing,
        rejected = summary.rejected,
        "Fetched inventory"
    );

    Ok(Json(InventoryResponse {
        branch: scope.branch,
        device_count: devices.len(),
        devices: devices.into_iter().map(Into::into).collect(),
        status_summary: Some(summary),
    }))
}

/// List a branch inventory by name, without authentication.
///
/// No status summary in this variant.
#[tracing::instrument(skip_all, fields(branch = %branch_name))]
pub async fn get_inventory_by_branch(
    State(state): State<AppState>,
    Path(branch_name): Path<String>,
) -> Result<Json<InventoryResponse>, Error> {
    if branch_name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Branch name is required".to_string(),
        });
    }

    let mut conn = state.inventory_db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Devices::new(&mut conn);
    let devices = repo.list_by_branch(&branch_name).await?;

    Ok(Json(InventoryResponse {
        branch: branch_name,
        device_count: devices.len(),
        devices: devices.into_iter().map(Into::into).collect(),
        status_summary: None,
    }))
}

/// Acknowledge a pending device, moving it to processing.
///
/// Only a pending device may be acknowledged; any prior status is reported
/// back as a conflict without mutating the row.
#[tracing::instrument(skip_all, fields(device_id = %device_id, branch = %scope.branch))]
pub async fn acknowledge_device(
    State(state): State<AppState>,
    scope: BranchScope,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceActionResponse>, Error> {
    if device_id.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Device ID is required".to_string(),
        });
    }

    let mut tx = state.inventory_db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Devices::new(&mut tx);

    let device = repo
        .get(&device_id, &scope.branch)
        .await?
        .ok_or_else(|| device_not_found(device_id.clone()))?;

    if device.status() != DeviceStatus::Pending {
        return Err(already(device.status()));
    }

    if !repo.mark_processing(&device_id, &scope.branch).await? {
        // A concurrent writer moved the row between our read and the guarded
        // update; report whatever state it left behind.
        let status = repo
            .get(&device_id, &scope.branch)
            .await?
            .map(|d| d.status())
            .unwrap_or(DeviceStatus::Processing);
        return Err(already(status));
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tracing::info!("Device acknowledged, now processing");

    Ok(Json(DeviceActionResponse {
        message: "Device acknowledged and set to Processing.".to_string(),
        device_id,
        new_status: DeviceStatus::Processing.label().to_string(),
    }))
}

/// Reject a device.
///
/// Allowed from pending and from processing; only an already-rejected device
/// conflicts. The asymmetry with acknowledge is deliberate.
#[tracing::instrument(skip_all, fields(device_id = %device_id, branch = %scope.branch))]
pub async fn reject_device(
    State(state): State<AppState>,
    scope: BranchScope,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceActionResponse>, Error> {
    if device_id.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Device ID is required".to_string(),
        });
    }

    let rejected_conflict = || Error::Conflict {
        message: "Device is already rejected.".to_string(),
    };

    let mut tx = state.inventory_db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Devices::new(&mut tx);

    let device = repo
        .get(&device_id, &scope.branch)
        .await?
        .ok_or_else(|| device_not_found(device_id.clone()))?;

    if device.status() == DeviceStatus::Rejected {
        return Err(rejected_conflict());
    }

    if !repo.mark_rejected(&device_id, &scope.branch).await? {
        // Lost a race against another reject; the row is already terminal.
        return Err(rejected_conflict());
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tracing::info!("Device rejected");

    Ok(Json(DeviceActionResponse {
        message: "Device rejected successfully.".to_string(),
        device_id,
        new_status: DeviceStatus::Rejected.label().to_string(),
    }))
}
