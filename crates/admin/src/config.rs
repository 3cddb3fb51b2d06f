//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the dashboard
//! - `SANITY_PROJECT_ID` - Content store project ID
//! - `SANITY_DATASET` - Content store dataset name
//! - `SANITY_ACCESS_TOKEN` - Content store API token (read + delete orders)
//! - `CLERK_JWT_KEY` - PEM public key for verifying session tokens
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SANITY_API_VERSION` - Store API version (default: 2024-12-30)
//! - `SANITY_API_URL` - Store base URL (default: `https://<project>.api.sanity.io`)
//! - `CLERK_AUTHORIZED_PARTIES` - Comma-separated allowed `azp` origins
//! - `CLERK_SIGN_IN_URL` - Hosted sign-in page
//! - `LISTING_CACHE_TTL_SECS` - Cached listing lifetime (default: 60)
//! - `LOG_FORMAT` - `json` for structured logs (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_SANITY_API_VERSION: &str = "2024-12-30";
const DEFAULT_LISTING_CACHE_TTL_SECS: u64 = 60;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Content store configuration
    pub sanity: SanityConfig,
    /// Identity provider configuration
    pub auth: AuthConfig,
    /// How long a rendered order listing stays cached
    pub listing_cache_ttl: Duration,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Content store configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct SanityConfig {
    /// Project ID (first label of the API host)
    pub project_id: String,
    /// Dataset holding the order documents
    pub dataset: String,
    /// API version date, without the leading `v`
    pub api_version: String,
    /// Base URL override; `None` means the hosted API
    pub api_url: Option<String>,
    /// API token with read and delete rights on orders
    pub token: SecretString,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl SanityConfig {
    /// Load the content store configuration on its own.
    ///
    /// Used by the CLI, which does not need the server settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or the
    /// token fails the placeholder and entropy checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            project_id: get_required_env("SANITY_PROJECT_ID")?,
            dataset: get_required_env("SANITY_DATASET")?,
            api_version: get_env_or_default("SANITY_API_VERSION", DEFAULT_SANITY_API_VERSION)
                .trim_start_matches('v')
                .to_string(),
            api_url: get_optional_env("SANITY_API_URL"),
            token: get_validated_secret("SANITY_ACCESS_TOKEN")?,
        })
    }

    /// Base URL of the store API.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.api_url.clone().unwrap_or_else(|| {
            format!("https://{}.api.sanity.io", self.project_id)
        })
    }
}

/// Identity provider configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded public key that signs session tokens
    pub jwt_key_pem: String,
    /// Allowed `azp` origins; empty means any
    pub authorized_parties: Vec<String>,
    /// Hosted sign-in page, if the provider offers one
    pub sign_in_url: Option<String>,
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        // PEM values in .env files usually carry literal "\n" sequences
        let jwt_key_pem = get_required_env("CLERK_JWT_KEY")?.replace("\\n", "\n");

        let authorized_parties = get_optional_env("CLERK_AUTHORIZED_PARTIES")
            .map(|raw| parse_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            jwt_key_pem,
            authorized_parties,
            sign_in_url: get_optional_env("CLERK_SIGN_IN_URL"),
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_BASE_URL".to_string(), e.to_string()))?;

        let listing_cache_ttl = get_optional_env("LISTING_CACHE_TTL_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("LISTING_CACHE_TTL_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_LISTING_CACHE_TTL_SECS);

        let sanity = SanityConfig::from_env()?;
        let auth = AuthConfig::from_env()?;
        let json_logs = get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            base_url,
            sanity,
            auth,
            listing_cache_ttl: Duration::from_secs(listing_cache_ttl),
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sanity_config(api_url: Option<&str>) -> SanityConfig {
        SanityConfig {
            project_id: "abc123xy".to_string(),
            dataset: "production".to_string(),
            api_version: DEFAULT_SANITY_API_VERSION.to_string(),
            api_url: api_url.map(String::from),
            token: SecretString::from("skq8Zr2Lm4Tp7Xv1Nb6Wd3Hf9Jc5Gs0"),
        }
    }

    #[test]
    fn test_shannon_entropy_bounds() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let err = validate_secret_strength("your-sanity-token-here", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let err = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("skq8Zr2Lm4Tp7Xv1Nb6Wd3Hf9Jc5Gs0", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_parse_list_drops_blanks() {
        assert_eq!(
            parse_list(" https://a.test, ,https://b.test ,"),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
    }

    #[test]
    fn test_sanity_base_url_default_and_override() {
        assert_eq!(sanity_config(None).base_url(), "https://abc123xy.api.sanity.io");
        assert_eq!(
            sanity_config(Some("http://127.0.0.1:9999")).base_url(),
            "http://127.0.0.1:9999"
        );
    }

    #[test]
    fn test_sanity_config_debug_redacts_token() {
        let debug_output = format!("{:?}", sanity_config(None));

        assert!(debug_output.contains("abc123xy"));
        assert!(debug_output.contains("production"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("skq8Zr2Lm4Tp7Xv1Nb6Wd3Hf9Jc5Gs0"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            sanity: sanity_config(None),
            auth: AuthConfig {
                jwt_key_pem: String::new(),
                authorized_parties: vec![],
                sign_in_url: None,
            },
            listing_cache_ttl: Duration::from_secs(60),
            json_logs: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }
}
