//! Authentication Service
//!
//! HS256 JWT issuance and verification over a configured secret.
//! Tokens are stateless: validity is signature plus expiry, nothing is
//! persisted server-side and there is no revocation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::shared::error::{PlatformError, Result};

/// Claims carried by an access token.
///
/// Login posts an arbitrary identity object; everything besides the email
/// rides along untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity key, matched against the user store by the role guards
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Remaining claim fields from the login payload
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Configuration for the auth service
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub secret_key: String,

    /// Token lifetime in seconds
    pub token_expiry_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            token_expiry_secs: 7200, // 2 hours (PT2H)
        }
    }
}

/// Token issuance and verification
pub struct AuthService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        info!(
            token_expiry_secs = config.token_expiry_secs,
            "AuthService initialized with HS256"
        );

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign a token for the given identity object.
    ///
    /// The payload must be a JSON object with an `email` field; no further
    /// validation is applied.
    pub fn issue(&self, identity: Value) -> Result<String> {
        let Value::Object(mut fields) = identity else {
            return Err(PlatformError::validation("token payload must be a JSON object"));
        };

        let email = match fields.remove("email") {
            Some(Value::String(email)) => email,
            _ => return Err(PlatformError::validation("token payload requires an email")),
        };

        let now = Utc::now();
        let claims = TokenClaims {
            email,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.token_expiry_secs)).timestamp(),
            extra: fields,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| PlatformError::internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Validate a token and extract its claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => PlatformError::TokenExpired,
                _ => PlatformError::InvalidToken { message: format!("{}", e) },
            })
    }
}

/// Extract bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(expiry_secs: i64) -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            token_expiry_secs: expiry_secs,
        })
    }

    #[test]
    fn issue_then_verify_roundtrips_claims() {
        let service = service(7200);

        let token = service
            .issue(json!({ "email": "a@x.com", "name": "Ada" }))
            .unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra.get("name"), Some(&json!("Ada")));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn issue_rejects_payload_without_email() {
        let service = service(7200);
        assert!(service.issue(json!({ "name": "Ada" })).is_err());
        assert!(service.issue(json!("not an object")).is_err());
    }

    #[test]
    fn expired_token_fails_verification() {
        // Past the 60s default leeway
        let service = service(-120);
        let token = service.issue(json!({ "email": "a@x.com" })).unwrap();

        match service.verify(&token) {
            Err(PlatformError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|c| c.email)),
        }
    }

    #[test]
    fn tampered_token_fails_verification() {
        let service = service(7200);
        let token = service.issue(json!({ "email": "a@x.com" })).unwrap();

        let other = AuthService::new(AuthConfig {
            secret_key: "different-secret".to_string(),
            token_expiry_secs: 7200,
        });

        assert!(matches!(
            other.verify(&token),
            Err(PlatformError::InvalidToken { .. })
        ));
    }

    #[test]
    fn bearer_extraction_requires_exact_prefix() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), None);
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}
