#![allow(dead_code)]

use actix_web::{test, web, App};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tempfile::TempDir;
use overtime_ledger::{
    auth::JwtManager,
    config::BootstrapAdmin,
    handlers,
    repositories::{
        SqliteAccountRepository, SqliteOvertimeRepository, SqlitePrivilegedStore,
        SqliteRoleRepository,
    },
    services::{AccountService, BootstrapService, OvertimeService},
};

pub const ADMIN_EMAIL: &str = "adm1@sistema.com";
pub const ADMIN_PASSWORD: &str = "adm111";

pub struct TestApp {
    pub pool: SqlitePool,
    pub jwt_manager: JwtManager,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        // Create temporary database
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to create database pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let jwt_manager = JwtManager::new("test_secret_key");

        Self {
            pool,
            jwt_manager,
            temp_dir,
        }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        // Initialize repositories
        let account_repository = Arc::new(SqliteAccountRepository::new(self.pool.clone()));
        let role_repository = Arc::new(SqliteRoleRepository::new(self.pool.clone()));
        let overtime_repository = Arc::new(SqliteOvertimeRepository::new(self.pool.clone()));
        let privileged_store = Arc::new(SqlitePrivilegedStore::new(self.pool.clone()));

        // Initialize services
        let account_service = web::Data::new(AccountService::new(account_repository, role_repository));
        let overtime_service = web::Data::new(OvertimeService::new(overtime_repository));
        let bootstrap_service = web::Data::new(BootstrapService::new(
            privileged_store,
            BootstrapAdmin::default(),
        ));
        let jwt_manager = web::Data::new(self.jwt_manager.clone());

        App::new()
            .app_data(account_service)
            .app_data(overtime_service)
            .app_data(bootstrap_service)
            .app_data(jwt_manager)
            .configure(handlers::configure_routes)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let app = test::init_service(self.create_app()).await;

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({
                "email": email,
                "password": password
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "login failed for {}", email);
        let body: serde_json::Value = test::read_body_json(resp).await;

        body["token"].as_str().unwrap().to_string()
    }

    /// Bootstraps the first administrator and returns a token for it.
    pub async fn admin_token(&self) -> String {
        let app = test::init_service(self.create_app()).await;

        let req = test::TestRequest::post()
            .uri("/api/setup/first-admin")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "bootstrap failed");

        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Creates an account through the API and returns its id.
    pub async fn create_user(&self, admin_token: &str, email: &str, full_name: &str, role: &str) -> String {
        let app = test::init_service(self.create_app()).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(serde_json::json!({
                "email": email,
                "password": "secret1",
                "full_name": full_name,
                "role": role
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "user creation failed for {}", email);
        let body: serde_json::Value = test::read_body_json(resp).await;

        body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_overtime(
        &self,
        admin_token: &str,
        user_id: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
        had_lunch: bool,
    ) -> serde_json::Value {
        let app = test::init_service(self.create_app()).await;

        let req = test::TestRequest::post()
            .uri("/api/overtime")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(serde_json::json!({
                "user_id": user_id,
                "date": date,
                "start_time": start_time,
                "end_time": end_time,
                "had_lunch": had_lunch
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "overtime creation failed");
        let body: serde_json::Value = test::read_body_json(resp).await;

        body["record"].clone()
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }
}
