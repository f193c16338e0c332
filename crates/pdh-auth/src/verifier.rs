//! HS256 access token verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::claims::AccessClaims;
use crate::error::AuthError;

/// Verifies bearer tokens signed with the platform's shared secret.
///
/// Tokens must carry `sub` and `exp`. Audience is not checked; the platform
/// issues `authenticated` for every user.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    #[must_use]
    pub fn from_config(config: &pdh_config::AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.leeway_secs)
    }

    /// Check signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenExpired`] past `exp` plus leeway, and
    /// [`AuthError::InvalidToken`] for anything malformed, unsigned, or
    /// signed with another key.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = decode::<AccessClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;
        tracing::debug!(sub = %data.claims.sub, "access token verified");
        Ok(data.claims)
    }

    /// Verify the value of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingToken`] when the header is not `Bearer <token>`,
    /// otherwise as [`Self::verify`].
    pub fn verify_header(&self, header: Option<&str>) -> Result<AccessClaims, AuthError> {
        let token = header
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;
        self.verify(token)
    }
}

/// Extract the token from `Bearer <token>`. The scheme is case-insensitive.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use pretty_assertions::assert_eq;

    use crate::claims::UserMetadata;

    const SECRET: &str = "test-secret-with-enough-length";

    fn sign(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_expiring_in(secs: i64) -> AccessClaims {
        AccessClaims {
            sub: "user_abc".into(),
            exp: chrono::Utc::now().timestamp() + secs,
            email: None,
            role: Some("authenticated".into()),
            user_metadata: Some(UserMetadata {
                email: Some("abc@example.com".into()),
                name: Some("Abc".into()),
            }),
        }
    }

    #[test]
    fn valid_token_round_trips_claims() {
        let claims = claims_expiring_in(3600);
        let verifier = TokenVerifier::new(SECRET, 0);
        let verified = verifier.verify(&sign(&claims, SECRET)).unwrap();
        assert_eq!(verified, claims);
        assert_eq!(
            verified.to_identity().email.as_deref(),
            Some("abc@example.com")
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let err = verifier
            .verify(&sign(&claims_expiring_in(-120), SECRET))
            .unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn leeway_tolerates_small_skew() {
        let verifier = TokenVerifier::new(SECRET, 60);
        assert!(verifier.verify(&sign(&claims_expiring_in(-10), SECRET)).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let err = verifier
            .verify(&sign(&claims_expiring_in(3600), "another-secret"))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn unsigned_token_is_rejected() {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let exp = chrono::Utc::now().timestamp() + 3600;
        let payload = engine.encode(format!(r#"{{"sub":"user_abc","exp":{exp}}}"#));
        let token = format!("{header}.{payload}.");

        let verifier = TokenVerifier::new(SECRET, 0);
        assert!(matches!(
            verifier.verify(&token).unwrap_err(),
            AuthError::InvalidToken(_)
        ));
    }

    #[test]
    fn token_without_exp_is_rejected() {
        #[derive(serde::Serialize)]
        struct NoExp {
            sub: &'static str,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExp { sub: "user_abc" },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let verifier = TokenVerifier::new(SECRET, 0);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, 0);
        assert!(matches!(
            verifier.verify("not-a-jwt").unwrap_err(),
            AuthError::InvalidToken(_)
        ));
    }

    #[test]
    fn header_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer   xyz "), Some("xyz"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);

        let verifier = TokenVerifier::new(SECRET, 0);
        assert!(matches!(
            verifier.verify_header(None).unwrap_err(),
            AuthError::MissingToken
        ));
    }
}
