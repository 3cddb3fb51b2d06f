//! Route access policy.
//!
//! - `matcher` - Which request paths go through the policy at all
//! - `policy` - Route classification and the allow/redirect decision

pub mod matcher;
pub mod policy;

pub use matcher::is_gated;
pub use policy::{AccessDecision, RouteClass, classify, evaluate};
