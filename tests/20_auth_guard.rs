mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Protected routes must reject requests without a token before any
/// database work happens.
#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/auth/verify",
        "/api/admin/dashboard",
        "/api/occupant/dashboard",
        "/api/files/property/00000000-0000-0000-0000-000000000000",
        "/api/communications/property/00000000-0000-0000-0000-000000000000",
    ] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for {}",
            path
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED", "body for {}: {}", path, body);
    }

    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/admin/dashboard", server.base_url))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/admin/dashboard", server.base_url))
        .header("Authorization", "Basic abc")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Login request validation runs before credentials are checked, so it
/// behaves the same with or without a database.
#[tokio::test]
async fn login_validates_request_shape() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/admin/login", server.base_url))
        .json(&json!({ "email": "not-an-email", "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["email"].is_string());

    let res = client
        .post(format!("{}/api/auth/occupant/login", server.base_url))
        .json(&json!({
            "property_code": "SHOP001",
            "email": "someone@example.com",
            "password": "short"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["password"].is_string());

    Ok(())
}

/// Bootstrap admin creation needs either a system token or an admin JWT;
/// with neither it must fail before touching account data.
#[tokio::test]
async fn admin_creation_rejects_anonymous_callers_with_bad_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // A made-up JWT is rejected at the auth step regardless of database
    // state, because admin_count > 0 requires a valid admin token and
    // admin_count == 0 requires the system token.
    let res = client
        .post(format!("{}/api/admin/admins", server.base_url))
        .header("Authorization", "Bearer still.not.a.jwt")
        .json(&json!({
            "email": "new-admin@example.com",
            "password": "secret123",
            "name": "New Admin"
        }))
        .send()
        .await?;

    assert!(
        res.status() == StatusCode::UNAUTHORIZED
            || res.status() == StatusCode::FORBIDDEN
            || res.status() == StatusCode::SERVICE_UNAVAILABLE
            || res.status() == StatusCode::INTERNAL_SERVER_ERROR,
        "unexpected status: {}",
        res.status()
    );

    Ok(())
}
