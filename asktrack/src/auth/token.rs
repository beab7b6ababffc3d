//! JWT issuance and verification for installer logins.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, db::models::installers::Installer, errors::Error};

/// Claims carried by an installer token.
///
/// `branch` is the sole authorization scope for inventory operations; a token
/// without it (or with an empty value) authenticates but authorizes nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerClaims {
    #[serde(rename = "Int_number")]
    pub number: String,
    #[serde(rename = "Int_code")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub iss: String,
    pub aud: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl InstallerClaims {
    /// Create new claims for an installer
    pub fn new(installer: &Installer, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(config.jwt.expiry_minutes);

        Self {
            number: installer.int_number.clone(),
            code: installer.int_code.clone(),
            role: installer.int_type.clone(),
            branch: installer.int_branch.clone(),
            iss: config.jwt.issuer.clone(),
            aud: config.jwt.audience.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Create a signed token for an installer
pub fn create_token(installer: &Installer, config: &Config) -> Result<String, Error> {
    let claims = InstallerClaims::new(installer, config);
    let key = EncodingKey::from_secret(config.jwt.secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode an installer token
pub fn verify_token(token: &str, config: &Config) -> Result<InstallerClaims, Error> {
    let key = DecodingKey::from_secret(config.jwt.secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.jwt.issuer]);
    validation.set_audience(&[&config.jwt.audience]);

    let token_data = decode::<InstallerClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated { message: None },

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        // Catch-all for any future error variants (default to server error for safety)
        _ => Error::Internal {
            operation: format!("JWT verification (unknown error): {e}"),
        },
    })?;

    Ok(token_data.claims)
}
