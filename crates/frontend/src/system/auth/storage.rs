use contracts::system::auth::{normalize_user, UserInfo};
use web_sys::window;

use crate::shared::config::SESSION_STORAGE_KEY;

/// Durable key/value storage holding the persisted session record.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl SessionStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) {
        match get_local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("localStorage rejected write of '{}'", key);
                }
            }
            None => log::warn!("localStorage unavailable, session will not survive reload"),
        }
    }

    fn remove(&self, key: &str) {
        match get_local_storage() {
            Some(storage) => {
                if storage.remove_item(key).is_err() {
                    log::warn!("localStorage rejected removal of '{}'", key);
                }
            }
            None => log::warn!("localStorage unavailable, cannot remove '{}'", key),
        }
    }
}

/// The serialized user record under one namespaced key.
#[derive(Debug, Clone, Copy)]
pub struct PersistedSession<S> {
    storage: S,
    key: &'static str,
}

impl PersistedSession<BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage, SESSION_STORAGE_KEY)
    }
}

impl<S: SessionStorage> PersistedSession<S> {
    pub fn new(storage: S, key: &'static str) -> Self {
        Self { storage, key }
    }

    /// Reads and normalizes the record. A record that cannot be parsed is
    /// removed and reported as absent.
    pub fn load(&self) -> Option<UserInfo> {
        let raw = self.storage.read(self.key)?;
        let parsed = serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|value| normalize_user(&value).map_err(|e| e.to_string()));
        match parsed {
            Ok(user) => Some(user),
            Err(reason) => {
                log::warn!("Discarding corrupt session record: {}", reason);
                self.storage.remove(self.key);
                None
            }
        }
    }

    pub fn save(&self, user: &UserInfo) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.write(self.key, &raw),
            Err(e) => log::warn!("Failed to serialize session record: {}", e),
        }
    }

    pub fn clear(&self) {
        self.storage.remove(self.key);
    }
}
