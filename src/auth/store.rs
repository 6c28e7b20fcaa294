//! In-memory token store
//!
//! Holds the current access and refresh tokens for the lifetime of the
//! process. Clones share the same underlying map, so one store can be handed
//! to every executor.

use super::types::TokenPair;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Key of the cached access token
pub const ACCESS_TOKEN: &str = "access_token";
/// Key of the cached refresh token
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Shared key/value token cache
#[derive(Clone, Default)]
pub struct TokenStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl TokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, replacing any previous value
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    /// Get the value under `key`
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Remove `key` if present
    pub async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Current access token
    pub async fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN).await
    }

    /// Current refresh token
    pub async fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN).await
    }

    /// Read both tokens under a single read lock
    pub async fn snapshot(&self) -> (Option<String>, Option<String>) {
        let entries = self.entries.read().await;
        (
            entries.get(ACCESS_TOKEN).cloned(),
            entries.get(REFRESH_TOKEN).cloned(),
        )
    }

    /// Overwrite both tokens under a single write lock.
    ///
    /// A pair without a refresh token removes the cached one.
    pub async fn store_pair(&self, pair: &TokenPair) {
        let mut entries = self.entries.write().await;
        entries.insert(ACCESS_TOKEN.to_string(), pair.access.clone());
        match &pair.refresh {
            Some(refresh) => {
                entries.insert(REFRESH_TOKEN.to_string(), refresh.clone());
            }
            None => {
                entries.remove(REFRESH_TOKEN);
            }
        }
    }

    /// Drop both tokens under a single write lock
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.remove(ACCESS_TOKEN);
        entries.remove(REFRESH_TOKEN);
    }

    /// Whether nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print token values; `try_read` keeps Debug non-blocking.
        let keys: Vec<String> = match self.entries.try_read() {
            Ok(entries) => {
                let mut keys: Vec<String> = entries.keys().cloned().collect();
                keys.sort();
                keys
            }
            Err(_) => vec!["<locked>".to_string()],
        };
        f.debug_struct("TokenStore").field("keys", &keys).finish()
    }
}
