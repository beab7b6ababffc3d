//! Database repository for the device inventory.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{errors::Result, models::devices::Device};

/// Branch-scoped access to the `user_info` table.
///
/// Every method takes the caller's branch and bakes it into the WHERE clause;
/// a device under another branch is indistinguishable from a missing one.
pub struct Devices<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Devices<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// All devices for a branch, newest device id first (string ordering).
    #[instrument(skip(self), fields(branch = %branch), err)]
    pub async fn list_by_branch(&mut self, branch: &str) -> Result<Vec<Device>> {
        let devices = sqlx::query_as::<_, Device>(
            r#"
            SELECT device_id, group_account, phone_number, isinstalled
            FROM user_info
            WHERE group_account = $1
            ORDER BY device_id DESC
            "#,
        )
        .bind(branch)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(devices)
    }

    /// Fetch a single device within the branch.
    #[instrument(skip(self), fields(device_id = %device_id, branch = %branch), err)]
    pub async fn get(&mut self, device_id: &str, branch: &str) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            SELECT device_id, group_account, phone_number, isinstalled
            FROM user_info
            WHERE device_id = $1 AND group_account = $2
            "#,
        )
        .bind(device_id)
        .bind(branch)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(device)
    }

    /// Move a pending device to processing.
    ///
    /// Compare-and-swap: the update only applies while the row is still
    /// pending, so two racing acknowledges cannot both succeed. Returns
    /// whether a row changed.
    #[instrument(skip(self), fields(device_id = %device_id, branch = %branch), err)]
    pub async fn mark_processing(&mut self, device_id: &str, branch: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE user_info
            SET isinstalled = FALSE
            WHERE device_id = $1 AND group_account = $2 AND isinstalled IS NULL
            "#,
        )
        .bind(device_id)
        .bind(branch)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Move a pending or processing device to rejected.
    ///
    /// Rejecting a processing device is allowed; only an already-rejected
    /// row is left untouched. Returns whether a row changed.
    #[instrument(skip(self), fields(device_id = %device_id, branch = %branch), err)]
    pub async fn mark_rejected(&mut self, device_id: &str, branch: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE user_info
            SET isinstalled = TRUE
            WHERE device_id = $1 AND group_account = $2 AND isinstalled IS DISTINCT FROM TRUE
            "#,
        )
        .bind(device_id)
        .bind(branch)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::devices::DeviceStatus;
    use crate::test_utils::seed_device;
    use sqlx::PgPool;

    async fn setup(pool: &PgPool) {
        crate::inventory_migrator().run(pool).await.unwrap();
    }

    #[sqlx::test(migrations = false)]
    async fn list_is_ordered_by_device_id_descending(pool: PgPool) {
        setup(&pool).await;
        seed_device(&pool, "DEV-1", "NORTH", "0700000001", None).await;
        seed_device(&pool, "DEV-3", "NORTH", "0700000003", Some(true)).await;
        seed_device(&pool, "DEV-2", "NORTH", "0700000002", Some(false)).await;
        seed_device(&pool, "DEV-9", "SOUTH", "0700000009", None).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Devices::new(&mut conn);
        let devices = repo.list_by_branch("NORTH").await.unwrap();

        let ids: Vec<&str> = devices.iter().map(|d| d.device_id.as_str()).collect();
        assert_eq!(ids, vec!["DEV-3", "DEV-2", "DEV-1"]);
    }

    #[sqlx::test(migrations = false)]
    async fn get_is_scoped_to_branch(pool: PgPool) {
        setup(&pool).await;
        seed_device(&pool, "DEV-1", "NORTH", "0700000001", None).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Devices::new(&mut conn);

        assert!(repo.get("DEV-1", "NORTH").await.unwrap().is_some());
        assert!(repo.get("DEV-1", "SOUTH").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = false)]
    async fn mark_processing_only_applies_to_pending(pool: PgPool) {
        setup(&pool).await;
        seed_device(&pool, "DEV-1", "NORTH", "0700000001", None).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Devices::new(&mut conn);

        assert!(repo.mark_processing("DEV-1", "NORTH").await.unwrap());
        // Second attempt loses the guard: the row is no longer pending.
        assert!(!repo.mark_processing("DEV-1", "NORTH").await.unwrap());

        let device = repo.get("DEV-1", "NORTH").await.unwrap().unwrap();
        assert_eq!(device.status(), DeviceStatus::Processing);
    }

    #[sqlx::test(migrations = false)]
    async fn mark_rejected_applies_to_pending_and_processing_but_not_rejected(pool: PgPool) {
        setup(&pool).await;
        seed_device(&pool, "DEV-A", "NORTH", "0700000001", None).await;
        seed_device(&pool, "DEV-B", "NORTH", "0700000002", Some(false)).await;
        seed_device(&pool, "DEV-C", "NORTH", "0700000003", Some(true)).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Devices::new(&mut conn);

        assert!(repo.mark_rejected("DEV-A", "NORTH").await.unwrap());
        assert!(repo.mark_rejected("DEV-B", "NORTH").await.unwrap());
        assert!(!repo.mark_rejected("DEV-C", "NORTH").await.unwrap());

        for id in ["DEV-A", "DEV-B", "DEV-C"] {
            let device = repo.get(id, "NORTH").await.unwrap().unwrap();
            assert_eq!(device.status(), DeviceStatus::Rejected);
        }
    }

    #[sqlx::test(migrations = false)]
    async fn transitions_are_scoped_to_branch(pool: PgPool) {
        setup(&pool).await;
        seed_device(&pool, "DEV-1", "NORTH", "0700000001", None).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Devices::new(&mut conn);

        assert!(!repo.mark_processing("DEV-1", "SOUTH").await.unwrap());
        assert!(!repo.mark_rejected("DEV-1", "SOUTH").await.unwrap());

        let device = repo.get("DEV-1", "NORTH").await.unwrap().unwrap();
        assert_eq!(device.status(), DeviceStatus::Pending);
    }
}
