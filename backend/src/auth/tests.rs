use super::*;
use axum::http::{Request, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

const SECRET: &str = "supersecretjwtsecretforunittesting123";
const USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
const SESSION_ID: &str = "9b2f1c1e-5d6a-4c1e-8f55-2a3b4c5d6e7f";

fn set_env_vars() {
    unsafe {
        env::set_var("SERVER_PORT", "8080");
        env::set_var("SERVER_BODY_LIMIT", "10");
        env::set_var("SERVER_TIMEOUT", "30");
        env::set_var("DATABASE_URL", "postgres://localhost:5432/db");
        env::set_var("SESSION_JWT_SECRET", SECRET);
    }
}

fn token(secret: &str, role: &str, exp: usize) -> String {
    let claims = SessionClaims {
        sub: USER_ID.to_string(),
        sid: SESSION_ID.to_string(),
        role: role.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn parts_with(header: Option<String>) -> Parts {
    let mut builder = Request::builder().uri("/api/v1/orders");
    if let Some(value) = header {
        builder = builder.header(AUTHORIZATION, value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();
    parts
}

#[test]
fn test_validate_session_jwt_success() {
    set_env_vars();
    let claims = validate_session_jwt(&token(SECRET, "user", 9999999999))
        .expect("Valid token should pass");
    assert_eq!(claims.sub, USER_ID);
    assert_eq!(claims.sid, SESSION_ID);
    assert_eq!(claims.role, "user");
}

#[test]
fn test_validate_session_jwt_expired() {
    set_env_vars();
    assert!(validate_session_jwt(&token(SECRET, "user", 1)).is_err());
}

#[test]
fn test_validate_session_jwt_invalid_signature() {
    set_env_vars();
    assert!(validate_session_jwt(&token("wrongsecret", "user", 9999999999)).is_err());
}

#[tokio::test]
async fn test_auth_user_extracts_identity_and_role() {
    set_env_vars();
    let mut parts = parts_with(Some(format!(
        "Bearer {}",
        token(SECRET, "admin", 9999999999)
    )));

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.user_id, Uuid::parse_str(USER_ID).unwrap());
    assert_eq!(user.session_id, Uuid::parse_str(SESSION_ID).unwrap());
    assert!(user.is_admin());
}

#[tokio::test]
async fn test_missing_or_malformed_header_is_unauthorized() {
    set_env_vars();
    let mut missing = parts_with(None);
    let err = AuthUser::from_request_parts(&mut missing, &()).await.unwrap_err();
    assert_eq!(err.0, StatusCode::UNAUTHORIZED);

    let mut basic = parts_with(Some("Basic abc".to_string()));
    let err = AuthUser::from_request_parts(&mut basic, &()).await.unwrap_err();
    assert_eq!(err.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_guard_rejects_regular_users() {
    set_env_vars();
    let mut parts = parts_with(Some(format!(
        "Bearer {}",
        token(SECRET, "user", 9999999999)
    )));

    let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();

    assert_eq!(err.0, StatusCode::FORBIDDEN);
}
