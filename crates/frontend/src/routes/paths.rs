//! Client-side routes of the console.

pub const LOGIN: &str = "/login";
pub const DASHBOARD: &str = "/dashboard";
pub const CLIENTS: &str = "/clients";
pub const PRODUCTS: &str = "/products";
pub const SUPPLIERS: &str = "/suppliers";
pub const SALES_POINTS: &str = "/salesPoints";
pub const STORES: &str = "/stores";
pub const EXPENSES: &str = "/expenses";
pub const CAISSE: &str = "/caisse";
pub const ARCHIVE: &str = "/archive";
pub const USERS: &str = "/users";

/// Strips query, fragment and trailing slash: `/products/?x=1` -> `/products`.
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

pub fn is_login_path(path: &str) -> bool {
    normalize_path(path) == LOGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/products/"), "/products");
        assert_eq!(normalize_path("/products?page=2"), "/products");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/salesPoints#top"), "/salesPoints");
    }

    #[test]
    fn test_is_login_path() {
        assert!(is_login_path("/login"));
        assert!(is_login_path("/login?redirect=%2Fdashboard"));
        assert!(!is_login_path("/logins"));
        assert!(!is_login_path("/dashboard"));
    }
}
