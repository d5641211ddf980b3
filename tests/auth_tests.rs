use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::{TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};

#[actix_web::test]
async fn test_login_success() {
    let test_app = TestApp::new().await;
    test_app.admin_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["expires_in"], 24 * 3600);
}

#[actix_web::test]
async fn test_login_email_is_case_insensitive() {
    let test_app = TestApp::new().await;
    test_app.admin_token().await;

    let token = test_app.login("ADM1@Sistema.com", ADMIN_PASSWORD).await;
    assert!(!token.is_empty());
}

#[actix_web::test]
async fn test_login_invalid_credentials() {
    let test_app = TestApp::new().await;
    test_app.admin_token().await;
    let app = test::init_service(test_app.create_app()).await;

    for (email, password) in [(ADMIN_EMAIL, "wrong_password"), ("nobody@example.com", ADMIN_PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({
                "email": email,
                "password": password
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("Invalid"));
    }
}

#[actix_web::test]
async fn test_login_empty_request_body() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_protected_endpoint_without_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/overtime").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_protected_endpoint_with_invalid_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", "Bearer invalid_token"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_returns_profile_and_role() {
    let test_app = TestApp::new().await;
    let admin_token = test_app.admin_token().await;
    test_app
        .create_user(&admin_token, "joao@example.com", "João Silva", "user")
        .await;
    let token = test_app.login("joao@example.com", "secret1").await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["first_name"], "João");
    assert_eq!(body["profile"]["role"], "user");
    assert_eq!(body["profile"]["email"], "joao@example.com");
}

#[actix_web::test]
async fn test_logout_is_stateless() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post().uri("/api/logout").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
