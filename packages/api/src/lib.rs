//! # API crate — WasteWise backend client
//!
//! Everything the frontend needs to talk to the WasteWise REST backend, with no
//! UI dependency. The `ui` crate wraps these types in Dioxus context and signals.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, auth header injection, refresh-on-401 and retry once |
//! | [`session`] | [`SessionManager`]: login, registration, logout, startup restore, connectivity |
//! | [`models`] | Wire types (`User`, `WasteType`, `WasteEntry`, `AnalyticsSummary`...) |
//! | [`state`] | Framework-free view state: entry form, dashboard aggregates, period selection |
//! | [`transport`] | The [`HttpTransport`] seam and its `reqwest` implementation |
//! | [`error`] | [`ApiError`], the error taxonomy rendered by the views |
//!
//! ## Endpoints
//!
//! All paths are relative to the configured base URL (default
//! `http://localhost:8000/api`):
//!
//! - `GET /waste-types/`, `GET /waste-entries/`, `POST /waste-entries/`,
//!   `DELETE /waste-entries/{id}/`, `GET /analytics/?period={week|month}`
//! - `POST /auth/login/`, `POST /auth/register/`, `POST /auth/logout/`,
//!   `GET /auth/current/`, `POST /auth/token/refresh/`

pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod state;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::*;
pub use session::{Connectivity, Registered, SessionManager, SessionState};
pub use store::AuthMode;
pub use transport::{HttpTransport, ReqwestTransport};
