//! Test utilities: in-process test server and seed helpers.

use axum_test::TestServer;
use sqlx::PgPool;

use crate::{
    AppState, build_router,
    config::{Config, JwtConfig},
    db::models::installers::Installer,
};

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        // Pools are injected directly in tests; the URLs are never dialed.
        credentials_database_url: "postgresql://unused".to_string(),
        inventory_database_url: "postgresql://unused".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-key-for-testing-only".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build a test server over the real router.
///
/// Both migrators run against the same test database; the credential and
/// inventory tables don't overlap, so sharing one pool is safe here even
/// though production uses two.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    crate::credentials_migrator().run(&pool).await.expect("credentials migrations failed");
    crate::inventory_migrator().run(&pool).await.expect("inventory migrations failed");

    let state = AppState {
        credentials_db: pool.clone(),
        inventory_db: pool,
        config: test_config(),
    };
    let router = build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub fn test_installer(number: &str, code: &str, pass: &str, installer_type: Option<&str>, branch: Option<&str>) -> Installer {
    Installer {
        id: 1,
        int_name: Some("Test Installer".to_string()),
        int_number: number.to_string(),
        int_code: code.to_string(),
        int_pass: pass.to_string(),
        int_type: installer_type.map(str::to_string),
        int_branch: branch.map(str::to_string),
        int_city: None,
    }
}

/// A signed bearer token for an installer, bypassing the login endpoint.
pub fn bearer_for(number: &str, code: &str, branch: Option<&str>) -> String {
    let installer = test_installer(number, code, "unused", None, branch);
    crate::auth::token::create_token(&installer, &test_config()).expect("Failed to sign test token")
}

pub async fn seed_installer(pool: &PgPool, number: &str, code: &str, pass: &str, installer_type: Option<&str>, branch: Option<&str>) {
    sqlx::query(
        r#"
        INSERT INTO installers (int_name, int_number, int_code, int_pass, int_type, int_branch)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind("Test Installer")
    .bind(number)
    .bind(code)
    .bind(pass)
    .bind(installer_type)
    .bind(branch)
    .execute(pool)
    .await
    .expect("Failed to seed installer");
}

pub async fn seed_device(pool: &PgPool, device_id: &str, branch: &str, phone_number: &str, isinstalled: Option<bool>) {
    sqlx::query(
        r#"
        INSERT INTO user_info (device_id, group_account, phone_number, isinstalled)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(device_id)
    .bind(branch)
    .bind(phone_number)
    .bind(isinstalled)
    .execute(pool)
    .await
    .expect("Failed to seed device");
}
