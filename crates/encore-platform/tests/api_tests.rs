//! Platform API Integration Tests
//!
//! Tests for domain models, token handling, guard behavior, and error
//! response shape.

use encore_platform::{Course, CourseStatus, Payment, Role, User};

// Unit tests for domain models
mod domain_tests {
    use super::*;
    use encore_platform::CartEntry;

    #[test]
    fn test_user_registration_defaults() {
        let user = User::new("a@x.com");
        assert_eq!(user.user_email, "a@x.com");
        assert_eq!(user.role, Role::None);
        assert!(!user.is_admin());
        assert!(!user.is_instructor());
        assert_eq!(user.id.len(), 13);
    }

    #[test]
    fn test_user_role_builders() {
        let admin = User::new("boss@x.com").with_role(Role::Admin);
        assert!(admin.is_admin());

        let instructor = User::new("mira@x.com")
            .with_name("Mira")
            .with_role(Role::Instructor);
        assert!(instructor.is_instructor());
        assert_eq!(instructor.name.as_deref(), Some("Mira"));
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::None).unwrap(), "none");
        assert_eq!(serde_json::to_value(Role::Instructor).unwrap(), "instructor");
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_new_course_starts_pending_with_no_enrollments() {
        let course = Course::new("Violin Basics", "mira@x.com", 49.99, 20);
        assert_eq!(course.status, CourseStatus::Pending);
        assert_eq!(course.enrolled, 0);
        assert!(!course.is_approved());
        assert!(course.feedback.is_none());
    }

    #[test]
    fn test_course_status_wire_names() {
        assert_eq!(CourseStatus::Pending.as_str(), "pending");
        assert_eq!(CourseStatus::Approved.as_str(), "approved");
        assert_eq!(CourseStatus::Denied.as_str(), "denied");
        assert_eq!(
            serde_json::to_value(CourseStatus::Approved).unwrap(),
            "approved"
        );
    }

    #[test]
    fn test_cart_entry_references_the_offering() {
        let entry = CartEntry::new("a@x.com", "0COURSE000001", 49.99)
            .with_course_name("Violin Basics");
        assert_eq!(entry.course_id, "0COURSE000001");
        assert_eq!(entry.course_name.as_deref(), Some("Violin Basics"));
    }

    #[test]
    fn test_payment_references_course_and_cart() {
        let payment = Payment::new("a@x.com", "txn_1", 49.99, "c1", "k1");
        assert_eq!(payment.course_id, "c1");
        assert_eq!(payment.cart_id, "k1");
        assert_eq!(payment.amount, 49.99);
    }

    #[test]
    fn test_entities_serialize_with_underscore_id() {
        let user = User::new("a@x.com");
        let doc = bson::to_document(&user).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(doc.contains_key("userEmail"));
    }
}

// Token service tests
mod token_tests {
    use encore_platform::{AuthConfig, AuthService, PlatformError};
    use serde_json::json;

    fn service(expiry_secs: i64) -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: "integration-secret".to_string(),
            token_expiry_secs: expiry_secs,
        })
    }

    #[test]
    fn test_issue_verify_roundtrip_preserves_claims() {
        let service = service(7200);
        let token = service
            .issue(json!({ "email": "a@x.com", "name": "Ada", "photoUrl": "http://x/y.png" }))
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra.get("name"), Some(&json!("Ada")));
        assert_eq!(claims.exp - claims.iat, 7200);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service(-120);
        let token = service.issue(json!({ "email": "a@x.com" })).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(PlatformError::TokenExpired)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = service(7200);
        assert!(matches!(
            service.verify("not-a-token"),
            Err(PlatformError::InvalidToken { .. })
        ));
    }
}

// Access guard tests: authentication short-circuits before any handler
mod guard_tests {
    use axum::extract::FromRequestParts;
    use axum::http::{Request, StatusCode};
    use encore_platform::{
        AppState, AuthConfig, AuthService, Authenticated, PlatformError, UserRepository,
    };
    use serde_json::json;
    use std::sync::Arc;

    async fn test_state() -> AppState {
        // The driver connects lazily, so no live server is needed for
        // token-only paths.
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let db = client.database("encore-guard-tests");

        AppState {
            auth_service: Arc::new(AuthService::new(AuthConfig {
                secret_key: "guard-secret".to_string(),
                token_expiry_secs: 7200,
            })),
            user_repo: Arc::new(UserRepository::new(&db)),
        }
    }

    fn parts_with_auth(state: &AppState, header: Option<&str>) -> axum::http::request::Parts {
        let mut builder = Request::builder().uri("/allUsers");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        parts.extensions.insert(state.clone());
        parts
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let state = test_state().await;
        let mut parts = parts_with_auth(&state, None);

        let err = Authenticated::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("guard must reject");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_header_is_401() {
        let state = test_state().await;

        for header in ["Basic abc", "bearer abc", "Bearer", "token abc"] {
            let mut parts = parts_with_auth(&state, Some(header));
            let result = Authenticated::from_request_parts(&mut parts, &()).await;
            assert!(
                matches!(result, Err(PlatformError::Unauthorized { .. })),
                "header {:?} must be rejected",
                header
            );
        }
    }

    #[tokio::test]
    async fn test_forged_token_is_401() {
        let state = test_state().await;

        let forger = AuthService::new(AuthConfig {
            secret_key: "some-other-secret".to_string(),
            token_expiry_secs: 7200,
        });
        let token = forger.issue(json!({ "email": "a@x.com" })).unwrap();

        let mut parts = parts_with_auth(&state, Some(&format!("Bearer {}", token)));
        let result = Authenticated::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(PlatformError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_valid_token_attaches_claims() {
        let state = test_state().await;

        let token = state
            .auth_service
            .issue(json!({ "email": "a@x.com" }))
            .unwrap();

        let mut parts = parts_with_auth(&state, Some(&format!("Bearer {}", token)));
        let Authenticated(claims) = Authenticated::from_request_parts(&mut parts, &())
            .await
            .expect("valid token must pass");
        assert_eq!(claims.email, "a@x.com");
    }
}

// Error response wire shape
mod error_shape_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use encore_platform::PlatformError;
    use serde_json::json;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_shape() {
        let response = PlatformError::unauthorized("unauthorized access").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["message"], json!("unauthorized access"));
    }

    #[tokio::test]
    async fn test_forbidden_shape() {
        let response = PlatformError::forbidden("forbidden access").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"], json!(true));
    }

    #[tokio::test]
    async fn test_store_failure_shape() {
        let response = PlatformError::internal("store unavailable").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], json!(true));
    }
}
