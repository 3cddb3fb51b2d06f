//! Caller identity resolution.
//!
//! Authentication itself is delegated to the hosted identity provider. The
//! provider signs a short-lived session token (RS256) and hands it to the
//! browser as the `__session` cookie; API clients may send it as a bearer
//! token instead. The dashboard only verifies that token against the
//! provider's public key, without a network round-trip.

mod error;

pub use error::IdentityError;

use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use orderdesk_core::UserId;

use crate::config::AuthConfig;
use crate::models::{Claims, Identity};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "__session";

/// Clock skew tolerated when checking `exp` and `nbf`, in seconds.
const CLOCK_SKEW_LEEWAY_SECS: u64 = 5;

/// Resolves the identity behind an incoming request.
pub trait IdentityProvider: Send + Sync {
    /// Returns `Ok(None)` for anonymous callers.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` when credentials are present but cannot be
    /// trusted, or the provider cannot be consulted.
    fn identify(&self, headers: &HeaderMap) -> Result<Option<Identity>, IdentityError>;
}

/// Payload of a provider session token.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    azp: Option<String>,
    #[serde(flatten)]
    claims: Claims,
}

/// Networkless verifier for provider session tokens.
pub struct ClerkSessionVerifier {
    key: DecodingKey,
    validation: Validation,
    authorized_parties: Vec<String>,
}

impl ClerkSessionVerifier {
    /// Build a verifier from the identity provider configuration.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidKey` if the PEM key cannot be parsed.
    pub fn new(config: &AuthConfig) -> Result<Self, IdentityError> {
        let key = DecodingKey::from_rsa_pem(config.jwt_key_pem.as_bytes())
            .map_err(IdentityError::InvalidKey)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = CLOCK_SKEW_LEEWAY_SECS;
        validation.validate_nbf = true;
        // Session tokens carry no audience; `azp` is checked instead
        validation.validate_aud = false;

        Ok(Self {
            key,
            validation,
            authorized_parties: config.authorized_parties.clone(),
        })
    }

    fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(IdentityError::InvalidToken)?;
        let session = data.claims;

        if let Some(azp) = &session.azp
            && !self.authorized_parties.is_empty()
            && !self.authorized_parties.iter().any(|p| p == azp)
        {
            return Err(IdentityError::UnauthorizedParty(azp.clone()));
        }

        Ok(Identity {
            user_id: UserId::from(session.sub),
            claims: session.claims,
        })
    }
}

impl IdentityProvider for ClerkSessionVerifier {
    fn identify(&self, headers: &HeaderMap) -> Result<Option<Identity>, IdentityError> {
        session_token(headers)
            .map(|token| self.verify(token))
            .transpose()
    }
}

/// Identity provider that always answers the same way.
///
/// Used in tests and for local development without a provider account.
#[derive(Debug, Clone)]
pub enum FixedIdentityProvider {
    /// Every caller is anonymous.
    Anonymous,
    /// Every caller is this identity.
    SignedIn(Identity),
    /// The provider is down.
    Failing,
}

impl IdentityProvider for FixedIdentityProvider {
    fn identify(&self, _headers: &HeaderMap) -> Result<Option<Identity>, IdentityError> {
        match self {
            Self::Anonymous => Ok(None),
            Self::SignedIn(identity) => Ok(Some(identity.clone())),
            Self::Failing => Err(IdentityError::Unavailable("provider offline".to_string())),
        }
    }
}

/// Extract the session token from the bearer header or the session cookie.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            v.split_once(' ')
                .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
                .map(|(_, token)| token.trim())
        })
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
            .map(|(_, value)| value)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::{Value, json};

    const PUBLIC_KEY: &str = include_str!("../../../tests/fixtures/session_public.pem");
    const PRIVATE_KEY: &str = include_str!("../../../tests/fixtures/session_private.pem");
    const OTHER_PRIVATE_KEY: &str = include_str!("../../../tests/fixtures/other_private.pem");

    fn verifier(authorized_parties: &[&str]) -> ClerkSessionVerifier {
        ClerkSessionVerifier::new(&AuthConfig {
            jwt_key_pem: PUBLIC_KEY.to_string(),
            authorized_parties: authorized_parties.iter().map(|s| (*s).to_string()).collect(),
            sign_in_url: None,
        })
        .unwrap()
    }

    fn sign(private_pem: &str, claims: &Value) -> String {
        let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
    }

    fn session_claims(extra: Value) -> Value {
        let now = chrono::Utc::now().timestamp();
        let mut claims = json!({
            "sub": "user_2abc",
            "sid": "sess_1",
            "iat": now,
            "nbf": now - 10,
            "exp": now + 60,
            "azp": "https://admin.example.test"
        });
        if let (Some(base), Some(extra)) = (claims.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        claims
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap());
        headers
    }

    #[test]
    fn test_no_token_is_anonymous() {
        assert_eq!(verifier(&[]).identify(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_bearer_token_with_admin_claim() {
        let token = sign(
            PRIVATE_KEY,
            &session_claims(json!({ "publicMetadata": { "isAdmin": true } })),
        );

        let identity = verifier(&[]).identify(&bearer(&token)).unwrap().unwrap();

        assert_eq!(identity.user_id.as_str(), "user_2abc");
        assert!(identity.is_admin());
    }

    #[test]
    fn test_session_cookie_without_metadata_is_not_admin() {
        let token = sign(PRIVATE_KEY, &session_claims(json!({})));
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; __session={token}; other=1")).unwrap(),
        );

        let identity = verifier(&[]).identify(&headers).unwrap().unwrap();

        assert!(!identity.is_admin());
    }

    #[test]
    fn test_token_signed_by_other_key_is_rejected() {
        let token = sign(OTHER_PRIVATE_KEY, &session_claims(json!({})));

        let err = verifier(&[]).identify(&bearer(&token)).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            PRIVATE_KEY,
            &session_claims(json!({ "nbf": now - 600, "exp": now - 300 })),
        );

        let err = verifier(&[]).identify(&bearer(&token)).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken(_)));
    }

    #[test]
    fn test_authorized_parties_enforced() {
        let token = sign(PRIVATE_KEY, &session_claims(json!({})));

        assert!(verifier(&["https://admin.example.test"]).identify(&bearer(&token)).is_ok());

        let err = verifier(&["https://elsewhere.test"])
            .identify(&bearer(&token))
            .unwrap_err();
        assert!(matches!(err, IdentityError::UnauthorizedParty(p) if p == "https://admin.example.test"));
    }

    #[test]
    fn test_garbage_key_fails_construction() {
        let result = ClerkSessionVerifier::new(&AuthConfig {
            jwt_key_pem: "not a pem".to_string(),
            authorized_parties: vec![],
            sign_in_url: None,
        });
        assert!(matches!(result, Err(IdentityError::InvalidKey(_))));
    }

    #[test]
    fn test_bearer_takes_precedence_over_cookie() {
        let mut headers = bearer("from-header");
        headers.insert(COOKIE, HeaderValue::from_static("__session=from-cookie"));
        assert_eq!(session_token(&headers), Some("from-header"));

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("__session=; x=1"));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_fixed_provider() {
        let headers = HeaderMap::new();
        assert!(FixedIdentityProvider::Anonymous.identify(&headers).unwrap().is_none());
        assert!(FixedIdentityProvider::Failing.identify(&headers).is_err());
    }
}
