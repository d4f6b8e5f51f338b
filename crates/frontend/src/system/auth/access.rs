//! Role-based access to console routes.
//!
//! Administrators reach every page. Every other role is confined to the
//! sales-point operational view.

use contracts::system::auth::Role;

use crate::routes::paths::{self, normalize_path};

pub const ADMIN_LANDING: &str = paths::DASHBOARD;
pub const NON_ADMIN_LANDING: &str = paths::SALES_POINTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// Default page after login for `role`.
pub fn landing_path(role: Role) -> &'static str {
    if role.is_admin() {
        ADMIN_LANDING
    } else {
        NON_ADMIN_LANDING
    }
}

/// Decides whether `role` may render `path`; evaluated before the page mounts.
pub fn resolve_access(role: Role, path: &str) -> Access {
    if role.is_admin() || normalize_path(path) == NON_ADMIN_LANDING {
        Access::Allow
    } else {
        Access::Redirect(NON_ADMIN_LANDING)
    }
}

/// `required` of `None` means any authenticated role.
pub fn role_permitted(role: Role, required: Option<&[Role]>) -> bool {
    required.map_or(true, |roles| roles.contains(&role))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NON_ADMIN: [Role; 5] = [
        Role::Vendeur,
        Role::GestionnaireStock,
        Role::Agent,
        Role::Superviseur,
        Role::Unknown,
    ];

    const PROTECTED: [&str; 10] = [
        paths::DASHBOARD,
        paths::CLIENTS,
        paths::PRODUCTS,
        paths::SUPPLIERS,
        paths::SALES_POINTS,
        paths::STORES,
        paths::EXPENSES,
        paths::CAISSE,
        paths::ARCHIVE,
        paths::USERS,
    ];

    #[test]
    fn test_vendeur_on_products_goes_to_sales_points() {
        assert_eq!(
            resolve_access(Role::Vendeur, "/products"),
            Access::Redirect("/salesPoints")
        );
    }

    #[test]
    fn test_admin_reaches_every_page() {
        for path in PROTECTED {
            assert_eq!(resolve_access(Role::Admin, path), Access::Allow, "{}", path);
        }
    }

    #[test]
    fn test_non_admin_confined_to_landing() {
        for role in NON_ADMIN {
            for path in PROTECTED {
                let expected = if path == NON_ADMIN_LANDING {
                    Access::Allow
                } else {
                    Access::Redirect(NON_ADMIN_LANDING)
                };
                assert_eq!(resolve_access(role, path), expected, "{:?} {}", role, path);
            }
            assert_eq!(resolve_access(role, "/salesPoints/"), Access::Allow);
            assert_eq!(resolve_access(role, "/salesPoints?tab=1"), Access::Allow);
            assert_eq!(
                resolve_access(role, "/salesPoints/42"),
                Access::Redirect(NON_ADMIN_LANDING)
            );
        }
    }

    #[test]
    fn test_landing_path() {
        assert_eq!(landing_path(Role::Admin), "/dashboard");
        assert_eq!(landing_path(Role::Superviseur), "/salesPoints");
    }

    #[test]
    fn test_role_permitted() {
        assert!(role_permitted(Role::Agent, None));
        assert!(role_permitted(Role::Admin, Some(&[Role::Admin])));
        assert!(!role_permitted(Role::Vendeur, Some(&[Role::Admin, Role::Superviseur])));
    }
}
