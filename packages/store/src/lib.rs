pub mod config;
pub mod cookies;
pub mod kv;
pub mod tokens;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::{AuthMode, WasteWiseConfig};
pub use kv::KeyValueStore;
pub use tokens::{TokenStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
