pub mod chat_cache;
pub mod database;
pub mod local_store;
pub mod session;

pub use chat_cache::ChatCache;
pub use database::Database;
pub use local_store::LocalStore;
pub use session::SessionStore;

use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("local storage lock poisoned")]
    Poisoned,
}

/// Ensure the parent directory of the storage file exists
pub fn ensure_data_dir(storage_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = storage_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Open the on-disk store, falling back to memory so the app still starts.
pub fn open_local_store(storage_path: &Path) -> Result<LocalStore, StorageError> {
    if let Err(err) = ensure_data_dir(storage_path) {
        log::warn!(
            "Unable to create data directory for {}: {err}",
            storage_path.display()
        );
    }

    match Database::new(storage_path) {
        Ok(db) => Ok(LocalStore::new(db)),
        Err(err) => {
            log::error!(
                "Failed to open local storage {} ({err}); falling back to in-memory store",
                storage_path.display()
            );
            LocalStore::in_memory()
        }
    }
}
