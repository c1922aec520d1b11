//! Persisted session tokens.
//!
//! The access and refresh tokens are kept as two separate entries so that a
//! refresh only rewrites the access token.

use crate::kv::KeyValueStore;

/// Storage key of the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Typed view over the two token entries of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct TokenStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TokenStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Store a fresh token pair, as issued by login or registration.
    pub fn set_tokens(&self, access: &str, refresh: &str) {
        self.store.set(ACCESS_TOKEN_KEY, access);
        self.store.set(REFRESH_TOKEN_KEY, refresh);
    }

    /// Replace the access token after a refresh.
    pub fn set_access_token(&self, access: &str) {
        self.store.set(ACCESS_TOKEN_KEY, access);
    }

    /// Remove both tokens.
    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_tokens_roundtrip_under_named_keys() {
        let kv = MemoryStore::new();
        let tokens = TokenStorage::new(kv.clone());

        assert!(tokens.access_token().is_none());
        assert!(tokens.refresh_token().is_none());

        tokens.set_tokens("access-1", "refresh-1");
        assert_eq!(kv.get("accessToken").as_deref(), Some("access-1"));
        assert_eq!(kv.get("refreshToken").as_deref(), Some("refresh-1"));
        assert!(tokens.has_access_token());
    }

    #[test]
    fn test_set_access_token_keeps_refresh() {
        let tokens = TokenStorage::new(MemoryStore::new());
        tokens.set_tokens("a1", "r1");

        tokens.set_access_token("a2");
        assert_eq!(tokens.access_token().as_deref(), Some("a2"));
        assert_eq!(tokens.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn test_clear_removes_both() {
        let kv = MemoryStore::new();
        let tokens = TokenStorage::new(kv.clone());
        tokens.set_tokens("a", "r");

        tokens.clear();
        assert!(kv.is_empty());
        assert!(!tokens.has_access_token());
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let kv = MemoryStore::new();
        kv.set(ACCESS_TOKEN_KEY, "");
        let tokens = TokenStorage::new(kv);
        assert!(tokens.access_token().is_none());
    }
}
