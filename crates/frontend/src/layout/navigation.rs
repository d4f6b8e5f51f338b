//! Sidebar entries of the console.

use contracts::system::auth::Role;

use crate::routes::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub admin_only: bool,
}

const fn entry(path: &'static str, label: &'static str, icon: &'static str) -> NavEntry {
    NavEntry {
        path,
        label,
        icon,
        admin_only: true,
    }
}

const fn shared(path: &'static str, label: &'static str, icon: &'static str) -> NavEntry {
    NavEntry {
        admin_only: false,
        ..entry(path, label, icon)
    }
}

pub const NAV_ENTRIES: &[NavEntry] = &[
    entry(paths::DASHBOARD, "Tableau de bord", "dashboard"),
    entry(paths::CLIENTS, "Clients", "clients"),
    entry(paths::PRODUCTS, "Produits", "products"),
    entry(paths::SUPPLIERS, "Fournisseurs", "suppliers"),
    shared(paths::SALES_POINTS, "Points de vente", "sales-point"),
    entry(paths::STORES, "Magasins", "store"),
    entry(paths::EXPENSES, "Dépenses", "expenses"),
    entry(paths::CAISSE, "Caisse", "caisse"),
    entry(paths::ARCHIVE, "Archives", "archive"),
    entry(paths::USERS, "Utilisateurs", "users"),
];

/// Every entry for an administrator, the non-admin-only ones otherwise.
pub fn visible_entries(role: Role) -> Vec<NavEntry> {
    NAV_ENTRIES
        .iter()
        .filter(|e| role.is_admin() || !e.admin_only)
        .copied()
        .collect()
}

/// Active when `current` is the entry itself or one of its sub-pages.
pub fn is_active(entry: &NavEntry, current: &str) -> bool {
    let current = paths::normalize_path(current);
    current == entry.path
        || current
            .strip_prefix(entry.path)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::access::{resolve_access, Access};

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(visible_entries(Role::Admin).len(), NAV_ENTRIES.len());
    }

    #[test]
    fn test_non_admin_sees_sales_points_only() {
        for role in [Role::Vendeur, Role::Agent, Role::Superviseur, Role::GestionnaireStock] {
            let visible: Vec<_> = visible_entries(role).iter().map(|e| e.path).collect();
            assert_eq!(visible, [paths::SALES_POINTS], "{:?}", role);
        }
    }

    #[test]
    fn test_visible_entries_pass_the_route_gate() {
        for role in [Role::Admin, Role::Vendeur, Role::Unknown] {
            for e in visible_entries(role) {
                assert_eq!(resolve_access(role, e.path), Access::Allow, "{:?} {}", role, e.path);
            }
        }
    }

    #[test]
    fn test_is_active() {
        let clients = NAV_ENTRIES[1];
        assert!(is_active(&clients, "/clients"));
        assert!(is_active(&clients, "/clients/"));
        assert!(is_active(&clients, "/clients/42"));
        assert!(!is_active(&clients, "/clientsArchive"));
        assert!(!is_active(&clients, "/products"));
    }
}
