//! Access policy evaluator.
//!
//! Rules, first match wins:
//!
//! 1. `/` and `/sign-in` (exact match) are public.
//! 2. Anything under `/admin` requires a signed-in caller whose claims
//!    carry `isAdmin: true`. Anonymous callers go to the sign-in page,
//!    everyone else to the home page.
//! 3. All other paths are allowed.

use crate::models::Identity;

/// Public routes, matched by exact string equality.
pub const PUBLIC_ROUTES: &[&str] = &["/", SIGN_IN_PATH];

/// Prefix of the admin-only area.
pub const ADMIN_PREFIX: &str = "/admin";

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const HOME_PATH: &str = "/";

/// Access class of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    AdminOnly,
    Default,
}

/// Outcome of evaluating the policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Caller is anonymous.
    RedirectToSignIn,
    /// Caller is signed in but not an admin.
    RedirectToHome,
}

impl AccessDecision {
    /// Redirect target, or `None` for `Allow`.
    #[must_use]
    pub const fn location(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToSignIn => Some(SIGN_IN_PATH),
            Self::RedirectToHome => Some(HOME_PATH),
        }
    }
}

#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if PUBLIC_ROUTES.contains(&path) {
        RouteClass::Public
    } else if path.starts_with(ADMIN_PREFIX) {
        RouteClass::AdminOnly
    } else {
        RouteClass::Default
    }
}

/// Decide whether a caller may reach `path`.
#[must_use]
pub fn evaluate(path: &str, identity: Option<&Identity>) -> AccessDecision {
    match classify(path) {
        RouteClass::Public | RouteClass::Default => AccessDecision::Allow,
        RouteClass::AdminOnly => match identity {
            None => AccessDecision::RedirectToSignIn,
            Some(identity) if !identity.is_admin() => AccessDecision::RedirectToHome,
            Some(_) => AccessDecision::Allow,
        },
    }
}
