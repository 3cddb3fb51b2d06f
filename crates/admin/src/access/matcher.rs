//! Inclusion filter for the access gate.
//!
//! Static assets and internal framework paths are served without consulting
//! the policy. A path looks like a static asset when it contains a dot.

/// Path prefix (after the leading `/`) reserved for framework internals.
/// Matched as a plain prefix.
const INTERNAL_PREFIX: &str = "_next";

/// Directory (a whole path segment) the stylesheet is served from.
const STATIC_DIR: &str = "static";

/// True if the access policy must be evaluated for `path`.
#[must_use]
pub fn is_gated(path: &str) -> bool {
    if path == "/" || path.starts_with("/api") || path.starts_with("/trpc") {
        return true;
    }

    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };

    !rest.contains('.') && !rest.starts_with(INTERNAL_PREFIX) && !is_static_dir(rest)
}

fn is_static_dir(rest: &str) -> bool {
    rest.strip_prefix(STATIC_DIR)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_pages_are_gated() {
        assert!(is_gated("/"));
        assert!(is_gated("/sign-in"));
        assert!(is_gated("/admin"));
        assert!(is_gated("/admin/orders/abc/delete"));
    }

    #[test]
    fn test_api_and_trpc_always_gated() {
        assert!(is_gated("/api/deleteOrder"));
        assert!(is_gated("/api/v1.2/thing"));
        assert!(is_gated("/trpc/orders.list"));
    }

    #[test]
    fn test_static_looking_paths_bypass() {
        assert!(!is_gated("/favicon.ico"));
        assert!(!is_gated("/admin/report.csv"));
        assert!(!is_gated("/static/admin.css"));
        assert!(!is_gated("/static/logo"));
        assert!(!is_gated("/_next/data"));
    }

    #[test]
    fn test_static_matches_whole_segment_only() {
        assert!(!is_gated("/static"));
        assert!(is_gated("/static-report"));
        assert!(is_gated("/statics/admin"));
        assert!(!is_gated("/_nextjs"));
    }
}
