//! Route-based access rules
//!
//! Rules are evaluated in order and the first match wins. Paths are matched
//! relative to the API base (`/api`). A subtree pattern `/x` matches `/x`
//! itself and anything below `/x/`.

use http::Method;

/// Required level of authentication for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token needed
    Public,
    /// Any valid token
    Authenticated,
    /// Valid token whose role is `ADMIN`
    Admin,
}

#[derive(Debug, Clone)]
enum PathPattern {
    Exact(&'static str),
    Subtree(&'static str),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == *p,
            PathPattern::Subtree(base) => path
                .strip_prefix(base)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

#[derive(Debug, Clone)]
struct AccessRule {
    /// `None` matches every method
    method: Option<Method>,
    patterns: Vec<PathPattern>,
    access: Access,
}

impl AccessRule {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method)
            && self.patterns.iter().any(|p| p.matches(path))
    }
}

/// Ordered access rules plus the API base path they are relative to
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    base_path: String,
    rules: Vec<AccessRule>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new("/api")
    }
}

impl AccessPolicy {
    pub fn new(base_path: impl Into<String>) -> Self {
        use PathPattern::{Exact, Subtree};

        let rules = vec![
            AccessRule {
                method: Some(Method::POST),
                patterns: vec![Exact("/v1/auth/login")],
                access: Access::Public,
            },
            AccessRule {
                method: Some(Method::GET),
                patterns: vec![Subtree("/v1/health")],
                access: Access::Public,
            },
            // Documentation paths stay open for a docs server mounted later
            AccessRule {
                method: None,
                patterns: vec![
                    Subtree("/swagger-ui"),
                    Exact("/swagger-ui.html"),
                    Subtree("/v3/api-docs"),
                    Subtree("/swagger-resources"),
                    Subtree("/webjars"),
                ],
                access: Access::Public,
            },
            AccessRule {
                method: Some(Method::GET),
                patterns: vec![
                    Subtree("/v1/profile"),
                    Subtree("/v1/projects"),
                    Subtree("/v1/skills"),
                ],
                access: Access::Public,
            },
            AccessRule {
                method: None,
                patterns: vec![Subtree("/v1/admin")],
                access: Access::Admin,
            },
        ];

        Self {
            base_path: base_path.into().trim_end_matches('/').to_string(),
            rules,
        }
    }

    /// Strip the API base; paths outside it are returned unchanged
    pub fn relative_path<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(self.base_path.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Access level for a request; `OPTIONS` is always public
    pub fn classify(&self, method: &Method, path: &str) -> Access {
        if method == Method::OPTIONS {
            return Access::Public;
        }

        let path = self.relative_path(path);
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.access)
            .unwrap_or(Access::Authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(method: Method, path: &str) -> Access {
        AccessPolicy::default().classify(&method, path)
    }

    #[test]
    fn test_public_routes() {
        assert_eq!(classify(Method::POST, "/api/v1/auth/login"), Access::Public);
        assert_eq!(classify(Method::GET, "/api/v1/health"), Access::Public);
        assert_eq!(classify(Method::GET, "/api/v1/profile"), Access::Public);
        assert_eq!(classify(Method::GET, "/api/v1/projects/featured"), Access::Public);
        assert_eq!(classify(Method::GET, "/api/v1/skills/category/BACKEND"), Access::Public);
        assert_eq!(classify(Method::GET, "/api/swagger-ui/index.html"), Access::Public);
        assert_eq!(classify(Method::POST, "/api/v3/api-docs"), Access::Public);
    }

    #[test]
    fn test_options_is_always_public() {
        assert_eq!(classify(Method::OPTIONS, "/api/v1/admin/projects"), Access::Public);
        assert_eq!(classify(Method::OPTIONS, "/anything"), Access::Public);
    }

    #[test]
    fn test_admin_routes_require_admin_for_any_method() {
        assert_eq!(classify(Method::GET, "/api/v1/admin/profile"), Access::Admin);
        assert_eq!(classify(Method::POST, "/api/v1/admin/projects"), Access::Admin);
        assert_eq!(classify(Method::DELETE, "/api/v1/admin"), Access::Admin);
    }

    #[test]
    fn test_other_routes_require_authentication() {
        assert_eq!(
            classify(Method::PUT, "/api/v1/auth/change-password"),
            Access::Authenticated
        );
        assert_eq!(classify(Method::GET, "/api/v1/auth/login"), Access::Authenticated);
        assert_eq!(classify(Method::POST, "/api/v1/projects"), Access::Authenticated);
        assert_eq!(classify(Method::GET, "/api/unknown"), Access::Authenticated);
        assert_eq!(classify(Method::GET, "/elsewhere"), Access::Authenticated);
    }

    #[test]
    fn test_subtree_does_not_match_sibling_prefix() {
        // `/v1/profiles` is not below `/v1/profile`
        assert_eq!(classify(Method::GET, "/api/v1/profiles"), Access::Authenticated);
        assert_eq!(classify(Method::GET, "/api/v1/administrator"), Access::Authenticated);
    }

    #[test]
    fn test_relative_path() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.relative_path("/api/v1/health"), "/v1/health");
        assert_eq!(policy.relative_path("/api"), "/");
        assert_eq!(policy.relative_path("/apiv1"), "/apiv1");
        assert_eq!(policy.relative_path("/v1/health"), "/v1/health");
    }
}
