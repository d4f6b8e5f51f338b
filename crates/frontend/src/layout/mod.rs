pub mod global_context;
pub mod left;
pub mod navigation;
pub mod top_header;

use leptos::prelude::*;
use leptos_router::components::{Outlet, Redirect};
use leptos_router::hooks::use_location;

use crate::system::auth::access::{resolve_access, Access};
use crate::system::auth::context::use_auth;
use global_context::LayoutContext;
use left::Sidebar;
use top_header::TopHeader;

/// Frame of every authenticated page.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |           Page               |
/// +------------------------------------------+
/// ```
///
/// The page itself is rendered only when the role may open the current path;
/// otherwise the user is sent to the role's own page before it mounts.
#[component]
pub fn ConsoleLayout() -> impl IntoView {
    provide_context(LayoutContext::new());

    let auth = use_auth();
    let pathname = use_location().pathname;

    let access = Memo::new(move |_| match auth.role() {
        Some(role) => pathname.with(|path| resolve_access(role, path)),
        // the surrounding ProtectedRoute deals with missing sessions
        None => Access::Allow,
    });

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Sidebar />
                <main class="app-main">
                    {move || match access.get() {
                        Access::Allow => view! { <Outlet /> }.into_any(),
                        Access::Redirect(to) => {
                            log::info!("Role not allowed on {}, redirecting to {}", pathname.get_untracked(), to);
                            view! { <Redirect path=to /> }.into_any()
                        }
                    }}
                </main>
            </div>
        </div>
    }
}
