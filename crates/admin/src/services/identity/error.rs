//! Identity verification error types.

use thiserror::Error;

/// Errors that can occur while resolving the caller's identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The configured verification key could not be parsed.
    #[error("invalid verification key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    /// The session token is malformed, expired, or badly signed.
    #[error("invalid session token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// The token was issued for an origin that is not allowed.
    #[error("session token issued for unauthorized party: {0}")]
    UnauthorizedParty(String),

    /// The identity provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
