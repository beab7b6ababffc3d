//! Database repository for installer credentials.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{errors::Result, models::installers::Installer};

/// Read-only access to the `installers` table.
///
/// Borrows a connection so it works over a pool connection or inside a
/// transaction, whichever the caller holds.
pub struct Installers<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Installers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up an installer by the exact (number, code, pass) tuple.
    ///
    /// All three fields must match verbatim; a miss on any of them returns
    /// `None`, and callers must not distinguish which field was wrong.
    #[instrument(skip(self, pass), fields(number = %number), err)]
    pub async fn find_by_credentials(&mut self, number: &str, code: &str, pass: &str) -> Result<Option<Installer>> {
        let installer = sqlx::query_as::<_, Installer>(
            r#"
            SELECT id, int_name, int_number, int_code, int_pass, int_type, int_branch, int_city
            FROM installers
            WHERE int_number = $1 AND int_code = $2 AND int_pass = $3
            "#,
        )
        .bind(number)
        .bind(code)
        .bind(pass)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(installer)
    }
}
