use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_location, use_query_map};

use super::access::{landing_path, role_permitted};
use super::context::use_auth;
use super::session::SessionStatus;
use crate::routes::paths::{self, is_login_path};

pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not hydrated yet: render a neutral placeholder, navigate nowhere.
    Pending,
    Redirect(String),
    Render,
}

/// Path plus query string of the current location.
pub fn requested_target(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_string()
    } else {
        format!("{}?{}", pathname, search)
    }
}

/// `/login?redirect=<target>` so a successful login can return there.
pub fn login_url_for(target: &str) -> String {
    format!(
        "{}?{}={}",
        paths::LOGIN,
        REDIRECT_PARAM,
        urlencoding::encode(target)
    )
}

/// Accepts only same-origin absolute paths that do not lead back to login.
pub fn sanitize_redirect(target: &str) -> Option<&str> {
    let target = target.trim();
    let safe = target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.contains("://")
        && !is_login_path(target);
    safe.then_some(target)
}

/// Where logout should send the user; `None` when already on the login page.
pub fn logout_redirect(current_path: &str) -> Option<&'static str> {
    (!is_login_path(current_path)).then_some(paths::LOGIN)
}

pub fn protected_decision(
    status: SessionStatus,
    requested: &str,
    required_roles: Option<&[Role]>,
) -> GuardDecision {
    match status {
        SessionStatus::Loading => GuardDecision::Pending,
        SessionStatus::Unauthenticated => GuardDecision::Redirect(login_url_for(requested)),
        SessionStatus::Authenticated(role) if !role_permitted(role, required_roles) => {
            GuardDecision::Redirect(landing_path(role).to_string())
        }
        SessionStatus::Authenticated(_) => GuardDecision::Render,
    }
}

pub fn public_decision(status: SessionStatus, redirect_param: Option<&str>) -> GuardDecision {
    match status {
        SessionStatus::Loading => GuardDecision::Pending,
        SessionStatus::Authenticated(role) => {
            let target = redirect_param
                .and_then(sanitize_redirect)
                .unwrap_or_else(|| landing_path(role));
            GuardDecision::Redirect(target.to_string())
        }
        SessionStatus::Unauthenticated => GuardDecision::Render,
    }
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-screen__spinner"></div>
        </div>
    }
}

fn render_decision(decision: GuardDecision, children: &ChildrenFn) -> AnyView {
    match decision {
        GuardDecision::Pending => view! { <LoadingScreen /> }.into_any(),
        GuardDecision::Redirect(to) => {
            log::debug!("Guard redirect -> {}", to);
            view! { <Redirect path=to /> }.into_any()
        }
        GuardDecision::Render => children(),
    }
}

/// Renders children only for an authenticated session, optionally restricted
/// to `required_roles`.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)] required_roles: Option<Vec<Role>>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    // memoized so that navigation inside the protected area does not remount it
    let decision = Memo::new(move |_| {
        let requested = requested_target(&location.pathname.get(), &location.search.get());
        protected_decision(auth.status(), &requested, required_roles.as_deref())
    });

    move || render_decision(decision.get(), &children)
}

/// Renders children only when nobody is logged in (the login form).
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();

    let decision = Memo::new(move |_| {
        let redirect = query.with(|q| q.get(REDIRECT_PARAM));
        public_decision(auth.status(), redirect.as_deref())
    });

    move || render_decision(decision.get(), &children)
}
