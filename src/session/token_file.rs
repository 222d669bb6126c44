//! Durable mirror of the bearer token. A single file under the state
//! directory; absence of the file means "no session". The value is opaque and
//! never parsed client-side.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;

use crate::config::token_path;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage io: {0}")]
    Io(#[from] std::io::Error),
}

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(state_dir: &Path) -> Self {
        Self { path: token_path(state_dir) }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => {
                let t = s.trim();
                if t.is_empty() { Ok(None) } else { Ok(Some(t.to_string())) }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory stand-in used by tests and ephemeral shells.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_token<S: Into<String>>(token: S) -> Self {
        Self { slot: RwLock::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.slot.read().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(tmp.path());
        assert!(store.load().unwrap().is_none());
        store.save("tok123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok123"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // clear on an already-absent file is not an error
        store.clear().unwrap();
    }

    #[test]
    fn file_store_creates_state_dir_on_save() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("deep").join("state");
        let store = FileTokenStore::new(&nested);
        store.save("t").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("t"));
    }

    #[test]
    fn whitespace_only_file_reads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(tmp.path());
        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        store.save("def").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("def"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
