use leptos::prelude::*;

use crate::routes::routes::AppRoutes;
use crate::shared::api::ApiClient;
use crate::shared::config::ClientConfig;
use crate::shared::notifications::{NotificationService, Toasts};
use crate::system::auth::context::{provide_auth, AuthContext};

/// Composition root: builds the session store and the API client once and
/// hands them to the tree through context.
#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::load();

    // hydrated before the first render so guards never see a stale state
    let auth = AuthContext::hydrate();
    provide_auth(auth);
    provide_context(ApiClient::new(config, auth));
    provide_context(NotificationService::new());

    view! {
        <AppRoutes />
        <Toasts />
    }
}
