use axum::{Json, extract::State};
use chrono::Utc;

use crate::{
    AppState,
    api::models::auth::{HealthResponse, LoginRequest, LoginResponse},
    auth::token,
    db::handlers::Installers,
    errors::Error,
};

/// Health probe; also exercises the CORS pipeline for browser clients.
#[tracing::instrument(skip_all)]
pub async fn test() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "CORS is working!".to_string(),
        timestamp: Utc::now(),
    })
}

/// Login with installer number, code, and password.
///
/// The failure response is identical whichever field mismatched; nothing
/// must reveal whether the number exists.
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    if request.number.trim().is_empty() || request.code.trim().is_empty() || request.pass.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Installer number, code and password are required".to_string(),
        });
    }

    let mut conn = state.credentials_db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut installers = Installers::new(&mut conn);

    let installer = installers
        .find_by_credentials(&request.number, &request.code, &request.pass)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Invalid credentials".to_string()),
        })?;

    let token = token::create_token(&installer, &state.config)?;

    tracing::info!(number = %installer.int_number, branch = ?installer.int_branch, "Installer logged in");

    Ok(Json(LoginResponse::new(installer, token)))
}
