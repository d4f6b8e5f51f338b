//! REST paths of the backend, relative to the API base URL.

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_ME: &str = "/auth/me";
pub const DASHBOARD_SUMMARY: &str = "/dashboard/summary";

/// True when `path` addresses the login call, ignoring query string and a
/// trailing slash.
pub fn is_login_endpoint(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    path == AUTH_LOGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_login_endpoint() {
        assert!(is_login_endpoint("/auth/login"));
        assert!(is_login_endpoint("/auth/login/"));
        assert!(is_login_endpoint("/auth/login?next=1"));
        assert!(!is_login_endpoint("/auth/logout"));
        assert!(!is_login_endpoint("/auth/login/extra"));
        assert!(!is_login_endpoint("/products"));
    }
}
