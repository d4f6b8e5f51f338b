//! Session state and its transitions.
//!
//! Only `hydrate`, `login`, `refresh_user`, `begin_logout`, `finish_logout`,
//! `expire` and `clear` write a session; the reactive wrapper in `context`
//! calls nothing else.

use contracts::shared::api::ApiError;
use contracts::system::auth::{normalize_user, Role, UserInfo, UserShapeError};
use serde_json::Value;

use super::guard::logout_redirect;
use super::storage::{PersistedSession, SessionStorage};
use crate::shared::api::interceptor::RedirectLatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

/// What guards branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Unauthenticated,
    Authenticated(Role),
}

impl Default for SessionState {
    /// Boot state, before hydration.
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    /// Rebuilds the session from the persisted record. Never touches the network.
    pub fn hydrate<S: SessionStorage>(persisted: &PersistedSession<S>) -> Self {
        let user = persisted.load();
        match &user {
            Some(u) => log::info!("Session restored for '{}' ({})", u.name, u.role.as_str()),
            None => log::info!("No stored session"),
        }
        Self {
            user,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn status(&self) -> SessionStatus {
        if self.loading {
            return SessionStatus::Loading;
        }
        match self.role() {
            Some(role) => SessionStatus::Authenticated(role),
            None => SessionStatus::Unauthenticated,
        }
    }

    /// Stores the user returned by a successful login call, whatever shape the
    /// API used for it.
    pub fn login<S: SessionStorage>(
        &mut self,
        persisted: &PersistedSession<S>,
        raw_user: &Value,
    ) -> Result<UserInfo, UserShapeError> {
        let user = normalize_user(raw_user)?;
        persisted.save(&user);
        log::info!("Logged in as '{}' ({})", user.name, user.role.as_str());
        self.user = Some(user.clone());
        self.loading = false;
        Ok(user)
    }

    /// Replaces the user after a profile refresh. A refresh that lands after a
    /// logout started is dropped.
    pub fn refresh_user<S: SessionStorage>(
        &mut self,
        persisted: &PersistedSession<S>,
        user: UserInfo,
    ) -> bool {
        if self.loading || self.user.is_none() {
            return false;
        }
        persisted.save(&user);
        self.user = Some(user);
        true
    }

    /// Marks a logout as in flight; guards show a neutral state until `clear`.
    pub fn begin_logout(&mut self) {
        self.loading = true;
    }

    /// Ends a logout once the server was notified, successfully or not. The
    /// local session is always dropped; the returned route is where the user
    /// goes next, `None` when `current_path` is already the login page.
    pub fn finish_logout<S: SessionStorage>(
        &mut self,
        persisted: &PersistedSession<S>,
        notified: Result<(), ApiError>,
        current_path: Option<&str>,
    ) -> Option<&'static str> {
        if let Err(e) = notified {
            log::warn!("Server logout failed, clearing local session anyway: {}", e);
        }
        self.clear(persisted);
        current_path.and_then(logout_redirect)
    }

    /// Teardown after the server answered 401.
    ///
    /// The persisted record is removed on every call. The in-memory session
    /// (whose loss sends the guards to login) is dropped only by the caller
    /// that arms `latch`, so a burst of 401s redirects once. Returns whether
    /// this call dropped it.
    pub fn expire<S: SessionStorage>(
        &mut self,
        persisted: &PersistedSession<S>,
        latch: &RedirectLatch,
    ) -> bool {
        persisted.clear();
        if !latch.try_acquire() {
            return false;
        }
        self.clear(persisted);
        true
    }

    /// Drops both the persisted and the in-memory session. Idempotent.
    pub fn clear<S: SessionStorage>(&mut self, persisted: &PersistedSession<S>) {
        persisted.clear();
        self.user = None;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::memory::MemoryStorage;
    use serde_json::json;

    const KEY: &str = "test.session";

    #[test]
    fn test_boot_state_is_loading() {
        let state = SessionState::default();
        assert_eq!(state.status(), SessionStatus::Loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_hydrate_without_record() {
        let storage = MemoryStorage::default();
        let state = SessionState::hydrate(&PersistedSession::new(&storage, KEY));
        assert!(!state.loading);
        assert!(state.user.is_none());
        assert_eq!(state.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_hydrate_with_corrupt_record_behaves_as_absent() {
        let storage = MemoryStorage::with(KEY, "\"unterminated");
        let state = SessionState::hydrate(&PersistedSession::new(&storage, KEY));
        assert_eq!(
            state,
            SessionState {
                user: None,
                loading: false
            }
        );
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_hydrate_with_valid_record_reads_storage_once() {
        let storage = MemoryStorage::with(KEY, r#"{"id":"9","name":"Ibou","role":"admin"}"#);
        let state = SessionState::hydrate(&PersistedSession::new(&storage, KEY));
        assert_eq!(state.status(), SessionStatus::Authenticated(Role::Admin));
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("9"));
        assert_eq!(storage.reads.get(), 1);
    }

    #[test]
    fn test_login_persists_normalized_user() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = SessionState::default();

        let user = state
            .login(&persisted, &json!({ "user": { "_id": "a1", "name": "Awa", "role": "vendeur" } }))
            .unwrap();

        assert_eq!(user.role, Role::Vendeur);
        assert!(state.is_authenticated());
        assert!(!state.loading);
        assert_eq!(persisted.load(), Some(user));
    }

    #[test]
    fn test_login_with_bad_shape_keeps_previous_state() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = SessionState::hydrate(&persisted);

        assert!(state.login(&persisted, &json!({ "name": "x" })).is_err());
        assert_eq!(state.status(), SessionStatus::Unauthenticated);
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = SessionState::default();
        state
            .login(&persisted, &json!({ "_id": "1", "name": "A", "role": "agent" }))
            .unwrap();

        state.begin_logout();
        assert_eq!(state.status(), SessionStatus::Loading);
        state.clear(&persisted);
        let once = state.clone();
        state.begin_logout();
        state.clear(&persisted);
        state.clear(&persisted);

        assert_eq!(state, once);
        assert_eq!(
            state,
            SessionState {
                user: None,
                loading: false
            }
        );
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_refresh_user() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = SessionState::default();
        let mut user = state
            .login(&persisted, &json!({ "_id": "1", "name": "A", "role": "agent" }))
            .unwrap();

        user.role = Role::Superviseur;
        assert!(state.refresh_user(&persisted, user.clone()));
        assert_eq!(state.role(), Some(Role::Superviseur));
        assert_eq!(persisted.load(), Some(user.clone()));

        state.begin_logout();
        assert!(!state.refresh_user(&persisted, user.clone()));
        state.clear(&persisted);
        assert!(!state.refresh_user(&persisted, user));
        assert!(storage.get(KEY).is_none());
    }

    fn logged_in(persisted: &PersistedSession<&MemoryStorage>) -> SessionState {
        let mut state = SessionState::default();
        state
            .login(persisted, &json!({ "_id": "1", "name": "A", "role": "admin" }))
            .unwrap();
        state
    }

    #[test]
    fn test_failed_logout_notification_still_clears() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = logged_in(&persisted);

        state.begin_logout();
        let next = state.finish_logout(&persisted, Err(ApiError::timeout()), Some("/clients"));

        assert_eq!(next, Some("/login"));
        assert_eq!(state.status(), SessionStatus::Unauthenticated);
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_logout_from_login_page_does_not_navigate() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = logged_in(&persisted);

        state.begin_logout();
        assert_eq!(state.finish_logout(&persisted, Ok(()), Some("/login")), None);
        assert_eq!(state.finish_logout(&persisted, Ok(()), None), None);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_repeated_logout_is_safe() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = logged_in(&persisted);

        for _ in 0..2 {
            state.begin_logout();
            let next = state.finish_logout(&persisted, Ok(()), Some("/dashboard"));
            assert_eq!(next, Some("/login"));
        }
        assert_eq!(
            state,
            SessionState {
                user: None,
                loading: false
            }
        );
    }

    #[test]
    fn test_burst_of_401s_drops_session_once() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = logged_in(&persisted);
        let latch = RedirectLatch::default();
        let user = state.user.clone().unwrap();

        assert!(state.expire(&persisted, &latch));
        assert_eq!(state.status(), SessionStatus::Unauthenticated);
        assert!(storage.get(KEY).is_none());

        for _ in 0..2 {
            // a late write from another tab or a login racing the burst
            persisted.save(&user);
            assert!(!state.expire(&persisted, &latch));
            assert!(storage.get(KEY).is_none());
        }
    }

    #[test]
    fn test_expire_rearms_after_release() {
        let storage = MemoryStorage::default();
        let persisted = PersistedSession::new(&storage, KEY);
        let mut state = logged_in(&persisted);
        let latch = RedirectLatch::default();

        assert!(state.expire(&persisted, &latch));
        latch.release();

        let mut state_again = logged_in(&persisted);
        assert!(state_again.expire(&persisted, &latch));
        assert!(state_again.user.is_none());
        assert!(state.user.is_none());
    }
}
