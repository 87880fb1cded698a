use super::StorageError;
use super::local_store::LocalStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

/// Holds the bearer token. Login state is simply its presence.
#[derive(Clone)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Read failures count as logged out.
    pub fn token(&self) -> Option<String> {
        read_non_empty(&self.store, TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        read_non_empty(&self.store, REFRESH_TOKEN_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn save_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set_item(TOKEN_KEY, token)?;
        log::info!("Session token stored");
        Ok(())
    }

    pub fn save_refresh_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set_item(REFRESH_TOKEN_KEY, token)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_item(TOKEN_KEY)?;
        self.store.remove_item(REFRESH_TOKEN_KEY)?;
        log::info!("Session cleared");
        Ok(())
    }
}

fn read_non_empty(store: &LocalStore, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value.filter(|token| !token.is_empty()),
        Err(err) => {
            log::warn!("Failed to read {key} from local storage: {err}");
            None
        }
    }
}
