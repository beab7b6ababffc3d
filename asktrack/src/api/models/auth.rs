//! API request/response models for authentication.
//!
//! Field casing (`Int_number`, `Int_Branch`, ...) is the upstream wire
//! contract; clients already depend on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::installers::Installer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Int_number")]
    pub number: String,
    #[serde(rename = "Int_code")]
    pub code: String,
    #[serde(rename = "Int_pass")]
    pub pass: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "Int_number")]
    pub number: String,
    #[serde(rename = "Int_code")]
    pub code: String,
    #[serde(rename = "Int_type")]
    pub installer_type: Option<String>,
    #[serde(rename = "Int_Branch")]
    pub branch: Option<String>,
}

impl LoginResponse {
    pub fn new(installer: Installer, token: String) -> Self {
        Self {
            message: "Login successful".to_string(),
            token,
            number: installer.int_number,
            code: installer.int_code,
            installer_type: installer.int_type,
            branch: installer.int_branch,
        }
    }
}

/// Health probe response for `GET /api/auth/test`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
