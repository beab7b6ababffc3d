//! Database record model for installer identities.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `installers` table (credentials database).
///
/// Installers are provisioned out-of-band; this service never inserts or
/// updates them. `int_pass` is stored as the upstream system stores it and is
/// compared verbatim during login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Installer {
    pub id: i32,
    pub int_name: Option<String>,
    pub int_number: String,
    pub int_code: String,
    pub int_pass: String,
    pub int_type: Option<String>,
    pub int_branch: Option<String>,
    pub int_city: Option<String>,
}
