//! # API gateway
//!
//! [`ApiClient`] is the single path from the views to the backend. It owns the
//! base URL, the [`AuthMode`], the transport and the persisted tokens, and
//! applies the same rules to every call:
//!
//! - **Bearer mode**: `Authorization: Bearer <access>` when an access token is
//!   stored. A 401 triggers exactly one `POST /auth/token/refresh/` and one
//!   retry of the original request. A failed refresh, or a second 401, clears
//!   the session and returns the original error. Concurrent 401s share one
//!   refresh: a request rejected with a token that has since been replaced
//!   retries with the new one.
//! - **Session mode**: requests carry browser credentials, unsafe methods carry
//!   `X-CSRFToken`. There is nothing to refresh, so a 401 clears the session.
//!
//! Login, registration and refresh skip the refresh path: their 401s are
//! credential failures, not expired tokens. No other status is retried.
//!
//! The client is a cheap handle (`Arc` inside); clones share the transport,
//! the token storage and the session state with [`crate::SessionManager`].

use std::sync::Arc;

use futures::lock::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::config::ApiConfig;
use store::cookies::{csrf_token, CSRF_HEADER_NAME};
use store::{AuthMode, KeyValueStore, TokenStorage};

use crate::error::ApiError;
use crate::models::{
    AnalyticsSummary, AuthResponse, LoginRequest, NewWasteEntry, Period, RefreshRequest,
    RefreshResponse, Registration, User, WasteEntry, WasteType,
};
use crate::session::{SessionState, SharedSession};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

const REFRESH_PATH: &str = "/auth/token/refresh/";

struct ClientInner<T, S: KeyValueStore> {
    base_url: String,
    auth_mode: AuthMode,
    transport: T,
    tokens: TokenStorage<S>,
    session: SharedSession,
    /// Held for the whole token exchange.
    refresh_lock: Mutex<()>,
}

/// HTTP client for the WasteWise backend.
pub struct ApiClient<T, S: KeyValueStore> {
    inner: Arc<ClientInner<T, S>>,
}

impl<T, S: KeyValueStore> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, auth_mode: AuthMode, transport: T, store: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ClientInner {
                base_url,
                auth_mode,
                transport,
                tokens: TokenStorage::new(store),
                session: SharedSession::default(),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    pub fn from_config(config: &ApiConfig, transport: T, store: S) -> Self {
        Self::new(config.base_url.clone(), config.auth_mode, transport, store)
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.inner.auth_mode
    }

    pub fn tokens(&self) -> &TokenStorage<S> {
        &self.inner.tokens
    }

    pub(crate) fn shared_session(&self) -> SharedSession {
        self.inner.session.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    fn build(&self, method: Method, path: &str, body: Option<&str>, attach_token: bool) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.url(path));
        if let Some(body) = body {
            request = request.json_body(body.to_string());
        }
        match self.inner.auth_mode {
            AuthMode::Bearer => {
                if attach_token {
                    if let Some(token) = self.inner.tokens.access_token() {
                        request = request.header("Authorization", format!("Bearer {token}"));
                    }
                }
            }
            AuthMode::Session => {
                request.with_credentials = true;
                if method.is_unsafe() {
                    if let Some(token) = csrf_token() {
                        request = request.header(CSRF_HEADER_NAME, token);
                    }
                }
            }
        }
        request
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
        attach_token: bool,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build(method, path, body, attach_token);
        tracing::debug!(method = method.as_str(), path, "api request");
        let response = self.inner.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = method.as_str(), path, "no response: {e}");
            ApiError::from(e)
        })?;
        tracing::debug!(method = method.as_str(), path, status = response.status, "api response");
        Ok(response)
    }

    /// Authenticated request with the refresh-and-retry-once rule.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let sent_with = self.inner.tokens.access_token();
        let response = self.send_once(method, path, body, true).await?;
        if response.status != 401 {
            return response.error_for_status();
        }
        let original = ApiError::from_status(response.status, &response.body);

        if self.inner.auth_mode == AuthMode::Session {
            self.expire_session();
            return Err(original);
        }

        if let Err(e) = self.refresh_after_rejection(sent_with.as_deref()).await {
            tracing::warn!(path, "token refresh failed: {e}");
            self.expire_session();
            return Err(original);
        }

        let retried = self.send_once(method, path, body, true).await?;
        if retried.status == 401 {
            tracing::warn!(path, "still unauthorized after token refresh");
            self.expire_session();
            return Err(original);
        }
        retried.error_for_status()
    }

    /// Request outside the refresh path (login, registration, refresh).
    async fn send_public(&self, method: Method, path: &str, body: &str) -> Result<HttpResponse, ApiError> {
        self.send_once(method, path, Some(body), false)
            .await?
            .error_for_status()
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.request(Method::Get, path, None).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = serde_json::to_string(body)?;
        let response = self.request(Method::Post, path, Some(&body)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Drop tokens and the cached user after an irrecoverable 401.
    fn expire_session(&self) {
        self.inner.tokens.clear();
        SessionState::update(&self.inner.session, |state| state.user = None);
        tracing::info!("session expired, signed out locally");
    }

    /// Refresh after `rejected` got a 401, unless another request already
    /// replaced it while this one waited for the lock.
    async fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<(), ApiError> {
        let _exchange = self.inner.refresh_lock.lock().await;
        match self.inner.tokens.access_token() {
            Some(current) if rejected != Some(current.as_str()) => {
                tracing::debug!("access token already refreshed");
                Ok(())
            }
            _ => self.exchange_refresh_token().await,
        }
    }

    /// Exchange the stored refresh token for a new access token.
    pub async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let _exchange = self.inner.refresh_lock.lock().await;
        self.exchange_refresh_token().await
    }

    async fn exchange_refresh_token(&self) -> Result<(), ApiError> {
        let refresh = self
            .inner
            .tokens
            .refresh_token()
            .ok_or_else(|| ApiError::Unauthorized("No refresh token stored".to_string()))?;
        let body = serde_json::to_string(&RefreshRequest { refresh })?;
        let response = self.send_public(Method::Post, REFRESH_PATH, &body).await?;
        let refreshed: RefreshResponse = serde_json::from_str(&response.body)?;
        match refreshed.refresh {
            Some(rotated) => self.inner.tokens.set_tokens(&refreshed.access, &rotated),
            None => self.inner.tokens.set_access_token(&refreshed.access),
        }
        tracing::info!("access token refreshed");
        Ok(())
    }

    /// Reachability probe. Any HTTP response means the backend is up.
    pub async fn probe(&self) -> Result<(), ApiError> {
        self.send_once(Method::Get, "/waste-types/", None, true).await?;
        Ok(())
    }

    pub async fn waste_types(&self) -> Result<Vec<WasteType>, ApiError> {
        self.get_json("/waste-types/").await
    }

    pub async fn waste_entries(&self) -> Result<Vec<WasteEntry>, ApiError> {
        self.get_json("/waste-entries/").await
    }

    /// Validate and submit a new entry. An invalid entry is never sent.
    pub async fn create_waste_entry(&self, entry: &NewWasteEntry) -> Result<WasteEntry, ApiError> {
        entry.validate()?;
        self.post_json("/waste-entries/", entry).await
    }

    pub async fn delete_waste_entry(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::Delete, &format!("/waste-entries/{id}/"), None)
            .await?;
        Ok(())
    }

    pub async fn analytics(&self, period: Period) -> Result<AnalyticsSummary, ApiError> {
        self.get_json(&format!("/analytics/?period={period}")).await
    }

    /// "Who am I". `Ok(None)` when the backend answers without a user id.
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let value: Value = self.get_json("/auth/current/").await?;
        if value.get("id").map_or(true, Value::is_null) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = serde_json::to_string(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let response = self.send_public(Method::Post, "/auth/login/", &body).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        registration.validate()?;
        let body = serde_json::to_string(registration)?;
        let response = self.send_public(Method::Post, "/auth/register/", &body).await?;
        if response.body.trim().is_empty() {
            return Ok(AuthResponse::default());
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Server-side logout. Invalidates `refresh` when given.
    pub async fn logout(&self, refresh: Option<&str>) -> Result<(), ApiError> {
        let body = match refresh {
            Some(refresh) => serde_json::to_string(&RefreshRequest {
                refresh: refresh.to_string(),
            })?,
            None => "{}".to_string(),
        };
        self.send_once(Method::Post, "/auth/logout/", Some(&body), true)
            .await?
            .error_for_status()?;
        Ok(())
    }
}
