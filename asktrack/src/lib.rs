//! # asktrack: Installer Authentication & Device Inventory
//!
//! `asktrack` is a small control backend for field installers. It exposes two
//! functions: credential-based login that issues a signed, time-limited token,
//! and branch-scoped access to a device inventory whose records move through a
//! pending → processing → rejected lifecycle.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and talks to two separate PostgreSQL datastores: the
//! credentials database (installer identities, read-only here) and the
//! inventory database (device records).
//!
//! ### Request Flow
//!
//! A client posts installer credentials to `/api/auth/login`. On an exact
//! match the handler issues an HS256 JWT embedding the installer's identity
//! and branch. Subsequent calls present the token as a bearer credential; the
//! extractors in [`auth::current_installer`] verify it and pull the branch
//! claim out before a handler runs. Every inventory read and status
//! transition is scoped to that branch — a device under another branch is
//! indistinguishable from a missing one.
//!
//! Status transitions are guarded compare-and-swap updates: the SQL predicate
//! pins the expected prior status, so two racing calls cannot both win. See
//! [`db::handlers::Devices`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use asktrack::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = asktrack::config::Args::parse();
//!     let config = Config::load(&args)?;
//!     asktrack::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};

/// Application state shared across all request handlers.
///
/// Holds one connection pool per datastore — credentials and inventory are
/// separate databases upstream and stay decoupled here — plus the loaded
/// configuration (JWT settings are read on every token verification).
#[derive(Clone)]
pub struct AppState {
    pub credentials_db: PgPool,
    pub inventory_db: PgPool,
    pub config: Config,
}

/// Get the migrator for the credentials datastore
pub fn credentials_migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations/credentials")
}

/// Get the migrator for the inventory datastore
pub fn inventory_migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations/inventory")
}

/// Connect both pools and run their migrations.
#[instrument(skip_all)]
async fn setup_databases(config: &Config) -> anyhow::Result<(PgPool, PgPool)> {
    info!("Connecting to credentials database");
    let credentials_db = PgPool::connect(&config.credentials_database_url).await?;
    credentials_migrator().run(&credentials_db).await?;

    info!("Connecting to inventory database");
    let inventory_db = PgPool::connect(&config.inventory_database_url).await?;
    inventory_migrator().run(&inventory_db).await?;

    Ok((credentials_db, inventory_db))
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        // The upstream deployment runs allow-all; mirror it when configured.
        return Ok(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
    }

    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any))
}

/// Build the application router with all endpoints and middleware.
///
/// Routes:
/// - `POST /api/auth/login` — credential login, returns a bearer token
/// - `GET /api/auth/test` — unauthenticated health probe
/// - `GET /api/inventory` — authenticated branch inventory with summary
/// - `GET /api/inventory/branch/{branchName}` — unauthenticated listing
/// - `POST /api/inventory/acknowledge/{deviceId}` — pending → processing
/// - `POST /api/inventory/reject/{deviceId}` — pending|processing → rejected
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let router = Router::new()
        .route("/api/auth/login", post(api::handlers::auth::login))
        .route("/api/auth/test", get(api::handlers::auth::test))
        .route("/api/inventory", get(api::handlers::inventory::get_inventory))
        .route(
            "/api/inventory/branch/{branch_name}",
            get(api::handlers::inventory::get_inventory_by_branch),
        )
        .route(
            "/api/inventory/acknowledge/{device_id}",
            post(api::handlers::inventory::acknowledge_device),
        )
        .route(
            "/api/inventory/reject/{device_id}",
            post(api::handlers::inventory::reject_device),
        )
        .with_state(state.clone());

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects both pools, runs migrations,
///    and builds the router
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    credentials_db: PgPool,
    inventory_db: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (credentials_db, inventory_db) = setup_databases(&config).await?;

        let state = AppState {
            credentials_db: credentials_db.clone(),
            inventory_db: inventory_db.clone(),
            config: config.clone(),
        };
        let router = build_router(&state)?;

        Ok(Self {
            router,
            config,
            credentials_db,
            inventory_db,
        })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("asktrack listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.credentials_db.close().await;
        self.inventory_db.close().await;

        Ok(())
    }
}
