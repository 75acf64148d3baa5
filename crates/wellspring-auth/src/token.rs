//! Identity token issuance and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// User ID (UUID string).
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// The identity asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

fn signing_secret(config: &AuthConfig) -> Result<&[u8], AuthError> {
    match config.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => Ok(secret.as_bytes()),
        _ => Err(AuthError::MissingSecret),
    }
}

/// Issue a signed identity token valid for
/// [`AuthConfig::token_lifetime_secs`].
pub fn issue_token(user_id: Uuid, email: &str, config: &AuthConfig) -> Result<String, AuthError> {
    let secret = signing_secret(config)?;

    let now = Utc::now().timestamp();
    let claims = IdentityClaims {
        user_id: user_id.to_string(),
        email: email.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a token: signature, expiry and issuer.
pub fn decode_token(token: &str, config: &AuthConfig) -> Result<IdentityClaims, AuthError> {
    let secret = signing_secret(config)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["exp", "iat", "iss"]);

    jsonwebtoken::decode::<IdentityClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Verify a token and return the identity it asserts.
///
/// Purely stateless; no store lookup is performed.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Identity, AuthError> {
    let claims = decode_token(token, config)?;
    let user_id = Uuid::parse_str(&claims.user_id)
        .map_err(|e| AuthError::TokenInvalid(format!("bad userId claim: {e}")))?;
    Ok(Identity {
        user_id,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_issuer: "wellspring-test".into(),
            ..AuthConfig::with_secret("test-secret")
        }
    }

    /// Sign arbitrary claims with the test secret.
    fn sign(claims: &IdentityClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn token_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, "u@x.com", &config).unwrap();
        let identity = verify_token(&token, &config).unwrap();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "u@x.com");
    }

    #[test]
    fn expiry_is_seven_days_by_default() {
        let config = test_config();
        let token = issue_token(Uuid::new_v4(), "u@x.com", &config).unwrap();
        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn claims_serialize_user_id_as_camel_case() {
        let claims = IdentityClaims {
            user_id: "abc".into(),
            email: "u@x.com".into(),
            iss: "wellspring".into(),
            iat: 0,
            exp: 1,
            jti: "j".into(),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "abc");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn missing_secret_fails_issue() {
        let config = AuthConfig::default();
        let err = issue_token(Uuid::new_v4(), "u@x.com", &config).unwrap_err();
        assert!(matches!(err, AuthError::MissingSecret));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let config = test_config();
        let token = issue_token(Uuid::new_v4(), "u@x.com", &config).unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{head}.{flipped}{}", &sig[1..]);

        let err = verify_token(&tampered, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = issue_token(Uuid::new_v4(), "u@x.com", &config).unwrap();

        let other = AuthConfig {
            jwt_secret: Some("another-secret".into()),
            ..test_config()
        };
        assert!(matches!(
            verify_token(&token, &other),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = IdentityClaims {
            user_id: Uuid::new_v4().to_string(),
            email: "u@x.com".into(),
            iss: config.jwt_issuer.clone(),
            iat: now - 8 * 24 * 60 * 60,
            exp: now - 24 * 60 * 60,
            jti: Uuid::new_v4().to_string(),
        };
        let token = sign(&claims, "test-secret");

        assert!(matches!(
            verify_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let config = test_config();
        assert!(matches!(
            verify_token("not.a.jwt", &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = IdentityClaims {
            user_id: "507f1f77bcf86cd799439011".into(),
            email: "u@x.com".into(),
            iss: config.jwt_issuer.clone(),
            iat: now,
            exp: now + 60,
            jti: Uuid::new_v4().to_string(),
        };
        let token = sign(&claims, "test-secret");

        assert!(matches!(
            verify_token(&token, &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn jti_is_unique() {
        let config = test_config();
        let uid = Uuid::new_v4();

        let c1 = decode_token(&issue_token(uid, "u@x.com", &config).unwrap(), &config).unwrap();
        let c2 = decode_token(&issue_token(uid, "u@x.com", &config).unwrap(), &config).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }
}
