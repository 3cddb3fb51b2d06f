//! Caller identity as reported by the identity provider.
//!
//! The provider attaches a claims bundle to every signed-in user. The only
//! claim the dashboard cares about is `publicMetadata.isAdmin`.

use orderdesk_core::UserId;
use serde::{Deserialize, Serialize};

/// A signed-in caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider user ID (`sub`).
    pub user_id: UserId,
    /// Claims bundle attached to the session.
    pub claims: Claims,
}

/// Claims bundle carried by a session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    #[serde(default)]
    pub public_metadata: Option<PublicMetadata>,
}

/// User metadata that the provider exposes to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMetadata {
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl Identity {
    /// Create an identity with the given admin flag.
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, is_admin: Option<bool>) -> Self {
        Self {
            user_id: user_id.into(),
            claims: Claims {
                public_metadata: Some(PublicMetadata { is_admin }),
            },
        }
    }

    /// True only when the claims carry `isAdmin: true`.
    ///
    /// A missing flag and an explicit `false` are treated the same.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.claims
            .public_metadata
            .as_ref()
            .and_then(|m| m.is_admin)
            .unwrap_or(false)
    }
}

/// Identity resolved by the access middleware for the current request.
///
/// Inserted into request extensions for every gated request; `None` means
/// the caller is anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentIdentity(pub Option<Identity>);
