use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::paths;
use crate::system::auth::access::landing_path;
use crate::system::auth::context::use_auth;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let auth = use_auth();
    let home = move || {
        auth.role()
            .map(landing_path)
            .unwrap_or(paths::LOGIN)
            .to_string()
    };

    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Cette page n'existe pas."</p>
            <A href=home>"Retour à l'accueil"</A>
        </div>
    }
}
