//! Top bar of the console: sidebar toggle, brand, current user and logout.
//! Clicking the user reloads the profile from the server.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::layout::global_context::use_layout;
use crate::shared::api::use_api;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::system::auth::context::use_auth;
use crate::system::auth::session::SessionStatus;

#[component]
pub fn TopHeader() -> impl IntoView {
    let layout = use_layout();
    let auth = use_auth();
    let api = use_api();
    let navigate = use_navigate();
    let notifications = use_notifications();

    let logging_out = move || auth.status() == SessionStatus::Loading;

    let refresh_profile = {
        let api = api.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            spawn_local(async move {
                if let Err(e) = auth.refresh_profile(&api).await {
                    if !e.is_cancelled() {
                        notifications.api_error(&e);
                    }
                }
            });
        }
    };

    let logout = move |_: MouseEvent| {
        if logging_out() {
            return;
        }
        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout(&api, move |to| navigate(to, Default::default()))
                .await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| layout.toggle_sidebar()
                    title=move || if layout.sidebar_open.get() { "Masquer le menu" } else { "Afficher le menu" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Console de gestion"</span>
            </div>

            <div class="top-header__actions">
                {move || auth.user().map(|user| view! {
                    <button
                        class="top-header__user"
                        on:click=refresh_profile.clone()
                        title="Actualiser le profil"
                    >
                        {icon("users")}
                        <span class="top-header__user-name">{user.name}</span>
                        <span class="top-header__user-role">{user.role.label()}</span>
                    </button>
                })}

                <button
                    class="top-header__icon-btn"
                    on:click=logout
                    disabled=logging_out
                    title="Déconnexion"
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
