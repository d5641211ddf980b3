use actix_web::{http::StatusCode, test};

mod common;
use common::{TestApp, ADMIN_EMAIL};

#[actix_web::test]
async fn test_first_admin_is_created_once() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/setup/first-admin")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email"], ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/setup/first-admin")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    assert_eq!(test_app.count_rows("users").await, 1);
    assert_eq!(test_app.count_rows("user_roles").await, 1);
}

#[actix_web::test]
async fn test_setup_status_reflects_bootstrap() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/setup/status").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["admin_exists"], false);

    test_app.admin_token().await;

    let req = test::TestRequest::get().uri("/api/setup/status").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["admin_exists"], true);
}

#[actix_web::test]
async fn test_bootstrap_refused_when_another_admin_exists() {
    let test_app = TestApp::new().await;
    let admin_token = test_app.admin_token().await;
    test_app
        .create_user(&admin_token, "chefe@example.com", "Maria Chefe", "admin")
        .await;

    // Demote the bootstrap account; an administrator still exists
    let app = test::init_service(test_app.create_app()).await;
    let me: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .to_request(),
    )
    .await;
    let admin_id = me["profile"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", admin_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(serde_json::json!({ "full_name": "Administrador", "role": "user" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/setup/first-admin")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(test_app.count_rows("users").await, 2);
}
