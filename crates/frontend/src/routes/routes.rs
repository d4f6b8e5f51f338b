use contracts::domain::catalog;
use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::dashboards::overview::DashboardPage;
use crate::domain::resource_list::ResourceListPage;
use crate::domain::sales_points::SalesPointsPage;
use crate::layout::ConsoleLayout;
use crate::system::auth::access::landing_path;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::{ProtectedRoute, PublicRoute};
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;

/// `/` sends the user to the landing page of their role.
#[component]
fn LandingRedirect() -> impl IntoView {
    let auth = use_auth();
    move || {
        auth.role().map(|role| view! { <Redirect path=landing_path(role) /> })
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route
                    path=path!("/login")
                    view=|| view! { <PublicRoute><LoginPage /></PublicRoute> }
                />
                <ParentRoute
                    path=path!("")
                    view=|| view! { <ProtectedRoute><ConsoleLayout /></ProtectedRoute> }
                >
                    <Route path=path!("") view=LandingRedirect />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/salesPoints") view=SalesPointsPage />
                    <Route path=path!("/clients") view=|| view! { <ResourceListPage resource=catalog::CLIENTS /> } />
                    <Route path=path!("/products") view=|| view! { <ResourceListPage resource=catalog::PRODUCTS /> } />
                    <Route path=path!("/suppliers") view=|| view! { <ResourceListPage resource=catalog::SUPPLIERS /> } />
                    <Route path=path!("/stores") view=|| view! { <ResourceListPage resource=catalog::STORES /> } />
                    <Route path=path!("/expenses") view=|| view! { <ResourceListPage resource=catalog::EXPENSES /> } />
                    <Route path=path!("/caisse") view=|| view! { <ResourceListPage resource=catalog::CAISSE /> } />
                    <Route path=path!("/archive") view=|| view! { <ResourceListPage resource=catalog::ARCHIVES /> } />
                    <Route
                        path=path!("/users")
                        view=|| view! {
                            <ProtectedRoute required_roles=vec![Role::Admin]>
                                <ResourceListPage resource=catalog::USERS />
                            </ProtectedRoute>
                        }
                    />
                    // unknown paths still go through the session and role gates
                    <Route path=path!("/*any") view=NotFoundPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
