//! # Key/value storage — the persistence seam
//!
//! Everything WasteWise keeps in the browser is a short string under a
//! well-known key, so the storage layer is a tiny synchronous key/value
//! interface. [`crate::MemoryStore`] backs it in tests and native builds,
//! `LocalStorageStore` (web feature) backs it with `window.localStorage`.
//!
//! Writes do not report failures. A full or disabled `localStorage` degrades to
//! "nothing persisted": the session still works for the lifetime of the page,
//! and the backend stays the authority on who is signed in.

/// Synchronous string store keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
