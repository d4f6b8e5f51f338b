use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::use_api;
use crate::system::auth::{api, context::use_auth};

/// Login form. Navigation after a successful login is left to `PublicRoute`,
/// which reacts to the session becoming authenticated.
#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let auth = use_auth();
    let client = use_api();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();

        is_loading.set(true);
        error_message.set(None);

        let client = client.clone();
        spawn_local(async move {
            let outcome = match api::login(&client, username_val, password_val).await {
                Ok(raw_user) => auth.login(&raw_user).map_err(|e| {
                    log::error!("Unusable user record in login response: {}", e);
                    "Réponse du serveur invalide".to_string()
                }),
                Err(e) => Err(e.message),
            };
            if let Err(message) = outcome {
                error_message.set(Some(message));
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Console de gestion"</h1>
                <h2>"Connexion"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Identifiant"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Mot de passe"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Connexion..." } else { "Se connecter" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
