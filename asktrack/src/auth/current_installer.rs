//! Extractors for the authenticated installer in handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

use crate::{
    AppState,
    auth::token::{self, InstallerClaims},
    errors::{Error, Result},
};

/// The verified claims of the calling installer.
///
/// Extraction parses the `Authorization: Bearer <token>` header and verifies
/// signature, issuer, audience, and expiry. It does not require a branch
/// claim; handlers that need one take [`BranchScope`] instead.
#[derive(Debug, Clone)]
pub struct CurrentInstaller(pub InstallerClaims);

impl FromRequestParts<AppState> for CurrentInstaller {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(Error::Unauthenticated { message: None })?;

        let auth_str = auth_header.to_str().map_err(|e| Error::BadRequest {
            message: format!("Invalid authorization header: {e}"),
        })?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(Error::Unauthenticated { message: None })?;

        let claims = token::verify_token(token, &state.config)?;
        Ok(CurrentInstaller(claims))
    }
}

/// The branch the calling installer is authorized for.
///
/// Built on top of [`CurrentInstaller`]; rejects with 401 before the handler
/// runs when the token carries no branch claim or an empty one. Every
/// inventory read and mutation is scoped to this value.
#[derive(Debug, Clone)]
pub struct BranchScope {
    pub branch: String,
    pub installer: InstallerClaims,
}

impl FromRequestParts<AppState> for BranchScope {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let CurrentInstaller(claims) = CurrentInstaller::from_request_parts(parts, state).await?;

        let branch = claims
            .branch
            .clone()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::Unauthenticated {
                message: Some("Branch not found in token.".to_string()),
            })?;

        Ok(BranchScope { branch, installer: claims })
    }
}
