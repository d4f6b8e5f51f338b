use contracts::shared::api::ApiError;
use contracts::system::auth::{Role, UserInfo, UserShapeError};
use leptos::prelude::*;
use serde_json::Value;

use super::api;
use super::session::{SessionState, SessionStatus};
use super::storage::{BrowserStorage, PersistedSession};
use crate::shared::api::interceptor::RedirectLatch;
use crate::shared::api::ApiClient;

/// Reactive session store shared through context.
///
/// Created once by the composition root (`App`); everything that needs the
/// session receives it with [`use_auth`].
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<SessionState>,
    persisted: PersistedSession<BrowserStorage>,
}

impl AuthContext {
    /// Hydrates from localStorage synchronously, before anything renders.
    pub fn hydrate() -> Self {
        let persisted = PersistedSession::browser();
        Self {
            state: RwSignal::new(SessionState::hydrate(&persisted)),
            persisted,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.with(SessionState::status)
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.state.with(SessionState::role)
    }

    /// Records a successful login. The network call is the caller's job.
    pub fn login(&self, raw_user: &Value) -> Result<UserInfo, UserShapeError> {
        let persisted = self.persisted;
        let mut next = self.state.get_untracked();
        let user = next.login(&persisted, raw_user)?;
        self.state.set(next);
        Ok(user)
    }

    /// Reloads the user from `/auth/me`, e.g. after an administrator changed
    /// the role.
    pub async fn refresh_profile(&self, client: &ApiClient) -> Result<UserInfo, ApiError> {
        let user = api::current_user(client).await?;
        let persisted = self.persisted;
        let mut applied = false;
        self.state
            .update(|s| applied = s.refresh_user(&persisted, user.clone()));
        if applied {
            log::info!("Profile refreshed for '{}' ({})", user.name, user.role.as_str());
        }
        Ok(user)
    }

    /// Best-effort server logout, then an unconditional local clear.
    ///
    /// `navigate` is called with the login route once the session is gone,
    /// unless the user is already there.
    pub async fn logout(&self, client: &ApiClient, navigate: impl Fn(&'static str)) {
        self.state.update(SessionState::begin_logout);
        let notified = api::logout(client).await;
        let persisted = self.persisted;
        let current = current_path();
        let mut next = None;
        self.state
            .update(|s| next = s.finish_logout(&persisted, notified, current.as_deref()));
        log::info!("Logged out");
        if let Some(to) = next {
            navigate(to);
        }
    }

    /// Local teardown after the server rejected the session. `true` when this
    /// call dropped the in-memory session, see [`SessionState::expire`].
    pub fn expire(&self, latch: &RedirectLatch) -> bool {
        let persisted = self.persisted;
        let mut dropped = false;
        self.state.maybe_update(|s| {
            dropped = s.expire(&persisted, latch);
            dropped
        });
        dropped
    }
}

fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

pub fn provide_auth(auth: AuthContext) {
    provide_context(auth);
}

/// Hook to access the session store
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not provided by App")
}
