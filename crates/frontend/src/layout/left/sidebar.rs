//! Sidebar built from the navigation entries visible to the current role.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::layout::global_context::use_layout;
use crate::layout::navigation::{is_active, visible_entries};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let layout = use_layout();
    let pathname = use_location().pathname;

    let entries = move || auth.role().map(visible_entries).unwrap_or_default();

    view! {
        <nav class="app-sidebar" class:hidden=move || !layout.sidebar_open.get()>
            <div class="app-sidebar__content">
                {move || entries().into_iter().map(|entry| {
                    let active = move || pathname.with(|p| is_active(&entry, p));
                    view! {
                        <A href=entry.path>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=active
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(entry.icon)}
                                    <span>{entry.label}</span>
                                </div>
                            </div>
                        </A>
                    }
                }).collect_view()}
            </div>
        </nav>
    }
}
