use contracts::domain::catalog;
use leptos::prelude::*;

use super::resource_list::ResourceListPage;
use crate::system::auth::context::use_auth;

/// Sales-point view; the only page of non-admin roles.
#[component]
pub fn SalesPointsPage() -> impl IntoView {
    let auth = use_auth();
    let greeting = auth
        .user()
        .map(|u| format!("Bienvenue, {} ({})", u.name, u.role.label()));

    view! {
        <ResourceListPage resource=catalog::SALES_POINTS subtitle=greeting />
    }
}
