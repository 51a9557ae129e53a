//! Device-local session state: the token pair and the cached user summary.
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use api_types::auth::UserSummary;
use serde::{Deserialize, Serialize};

/// The access/refresh token pair.
///
/// The two tokens are only useful together: the access token expires within
/// the hour and the refresh token is the only way to replace it. Stores
/// therefore write and clear them as a unit; there is no way to persist
/// half a pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Storage for session state.
///
/// Reads on missing or unreadable storage behave as "not authenticated";
/// writes are best-effort. Implementations are shared between the request
/// dispatcher and the refresher, so they must be safe to call from
/// concurrent tasks.
pub trait CredentialStore: Send + Sync {
    fn credentials(&self) -> Option<CredentialPair>;
    fn store_credentials(&self, pair: CredentialPair);
    fn clear_credentials(&self);
    fn cached_user(&self) -> Option<UserSummary>;
    fn cache_user(&self, user: UserSummary);
    fn clear_cached_user(&self);

    /// The short-lived bearer token, when present.
    fn access_token(&self) -> Option<String> {
        self.credentials().map(|pair| pair.access_token)
    }

    /// The long-lived refresh token, when present.
    fn refresh_token(&self) -> Option<String> {
        self.credentials().map(|pair| pair.refresh_token)
    }

    /// Wipes everything. Used on logout and on expired sessions.
    fn clear_session(&self) {
        self.clear_credentials();
        self.clear_cached_user();
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    credentials: Option<CredentialPair>,
    user: Option<UserSummary>,
}

/// Volatile store, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<SessionState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out already authenticated.
    #[must_use]
    pub fn with_credentials(pair: CredentialPair) -> Self {
        let store = Self::default();
        store.store_credentials(pair);
        store
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryStore {
    fn credentials(&self) -> Option<CredentialPair> {
        self.state().credentials.clone()
    }

    fn store_credentials(&self, pair: CredentialPair) {
        self.state().credentials = Some(pair);
    }

    fn clear_credentials(&self) {
        self.state().credentials = None;
    }

    fn cached_user(&self) -> Option<UserSummary> {
        self.state().user.clone()
    }

    fn cache_user(&self, user: UserSummary) {
        self.state().user = Some(user);
    }

    fn clear_cached_user(&self) {
        self.state().user = None;
    }
}

/// Write-through JSON file store; the file holds the whole session state.
///
/// Failed writes are logged and otherwise ignored: losing persistence
/// degrades to an in-memory session, which is strictly better than taking
/// the app down over a read-only disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: Mutex<SessionState>,
}

impl FileStore {
    /// Opens the store, loading existing state. A missing or unreadable
    /// file starts an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = read_state(&path).unwrap_or_default();
        Self {
            path,
            inner: Mutex::new(state),
        }
    }

    fn mutate(&self, op: impl FnOnce(&mut SessionState)) {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        op(&mut guard);
        if let Err(err) = write_state(&self.path, &guard) {
            tracing::warn!(path = %self.path.display(), %err, "session state not persisted");
        }
    }

    fn read<T>(&self, op: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        op(&guard)
    }
}

impl CredentialStore for FileStore {
    fn credentials(&self) -> Option<CredentialPair> {
        self.read(|state| state.credentials.clone())
    }

    fn store_credentials(&self, pair: CredentialPair) {
        self.mutate(|state| state.credentials = Some(pair));
    }

    fn clear_credentials(&self) {
        self.mutate(|state| state.credentials = None);
    }

    fn cached_user(&self) -> Option<UserSummary> {
        self.read(|state| state.user.clone())
    }

    fn cache_user(&self, user: UserSummary) {
        self.mutate(|state| state.user = Some(user));
    }

    fn clear_cached_user(&self) {
        self.mutate(|state| state.user = None);
    }
}

fn read_state(path: &Path) -> Option<SessionState> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_state(path: &Path, state: &SessionState) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)
        .map_err(|_| std::io::Error::other("serialize failed"))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
