//! Authentication and authorization.
//!
//! Installers authenticate once via `POST /api/auth/login` and receive a
//! signed, time-limited JWT. Subsequent calls present it as a bearer token;
//! no session state is kept server-side.
//!
//! # Modules
//!
//! - [`token`]: token issuance and stateless verification
//! - [`current_installer`]: extractors that verify the bearer token and, for
//!   inventory routes, gate on the branch claim
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use asktrack::auth::current_installer::BranchScope;
//!
//! async fn handler(scope: BranchScope) -> Result<String, Error> {
//!     Ok(format!("scoped to branch {}", scope.branch))
//! }
//! ```

pub mod current_installer;
pub mod token;
