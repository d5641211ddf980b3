use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use overtime_ledger::auth::JwtManager;
use overtime_ledger::config::AppConfig;
use overtime_ledger::handlers;
use overtime_ledger::openapi_config::{configure_openapi, ApiDoc};
use overtime_ledger::repositories::{
    SqliteAccountRepository, SqliteOvertimeRepository, SqlitePrivilegedStore, SqliteRoleRepository,
};
use overtime_ledger::services::{AccountService, BootstrapService, OvertimeService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // Initialize database
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid DATABASE_URL {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .context("Failed to open database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    // Initialize repositories
    let account_repository = Arc::new(SqliteAccountRepository::new(pool.clone()));
    let role_repository = Arc::new(SqliteRoleRepository::new(pool.clone()));
    let overtime_repository = Arc::new(SqliteOvertimeRepository::new(pool.clone()));
    // Only the bootstrap service gets elevated write access
    let privileged_store = Arc::new(SqlitePrivilegedStore::new(pool.clone()));

    // Initialize services with dependency injection
    let account_service = web::Data::new(AccountService::new(account_repository, role_repository));
    let overtime_service = web::Data::new(OvertimeService::new(overtime_repository));
    let bootstrap_service = web::Data::new(BootstrapService::new(
        privileged_store,
        config.bootstrap_admin.clone(),
    ));

    let jwt_manager = web::Data::new(JwtManager::new(&config.jwt_secret));

    tracing::info!("Overtime Ledger listening on http://{}", config.bind_address);
    tracing::info!("API documentation: http://{}/swagger-ui/", config.bind_address);

    let openapi_spec = configure_openapi(ApiDoc::openapi());

    HttpServer::new(move || {
        App::new()
            .app_data(jwt_manager.clone())
            .app_data(account_service.clone())
            .app_data(overtime_service.clone())
            .app_data(bootstrap_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .wrap(Logger::default())
            .service(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi_spec.clone()),
            )
            .configure(handlers::configure_routes)
    })
    .bind(config.bind_address)?
    .run()
    .await?;

    Ok(())
}
