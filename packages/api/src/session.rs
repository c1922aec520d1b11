//! # Session manager
//!
//! [`SessionManager`] owns the signed-in user, the persisted tokens (through
//! its [`ApiClient`]) and the backend reachability flag. The UI provides one
//! instance through context and copies [`SessionManager::state`] into a
//! signal after every operation.
//!
//! Connectivity follows `checking → connected | disconnected`. Later probes
//! move it between the two settled states. Coming back from `disconnected`
//! with no user restores the session from the stored credentials.

use std::sync::{Arc, Mutex, PoisonError};

use store::{AuthMode, KeyValueStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, Registration, User};
use crate::transport::HttpTransport;

/// Backend reachability as last observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connectivity {
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Connectivity::Disconnected)
    }
}

/// Snapshot of the session, as rendered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub connectivity: Connectivity,
    /// True until the startup sequence has finished.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            connectivity: Connectivity::Checking,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) fn update(shared: &SharedSession, f: impl FnOnce(&mut SessionState)) {
        let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    pub(crate) fn snapshot(shared: &SharedSession) -> SessionState {
        shared.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Session state shared between the manager and the gateway, which clears the
/// user after an irrecoverable 401.
pub(crate) type SharedSession = Arc<Mutex<SessionState>>;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq)]
pub enum Registered {
    /// The backend issued tokens; the user is signed in.
    SignedIn(User),
    /// Account created, the user still has to log in.
    AccountCreated,
}

/// Login, registration, logout and startup restore.
pub struct SessionManager<T, S: KeyValueStore> {
    client: ApiClient<T, S>,
    session: SharedSession,
}

impl<T, S: KeyValueStore> Clone for SessionManager<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            session: Arc::clone(&self.session),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStore> SessionManager<T, S> {
    pub fn new(client: ApiClient<T, S>) -> Self {
        let session = client.shared_session();
        Self { client, session }
    }

    /// The gateway, for the data views.
    pub fn client(&self) -> &ApiClient<T, S> {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        SessionState::snapshot(&self.session)
    }

    pub fn user(&self) -> Option<User> {
        self.state().user
    }

    pub fn connectivity(&self) -> Connectivity {
        self.state().connectivity
    }

    fn set_user(&self, user: Option<User>) {
        SessionState::update(&self.session, |state| state.user = user);
    }

    /// Startup: probe the backend, restore the user when it is reachable.
    pub async fn init(&self) -> SessionState {
        if self.test_backend_connection().await == Connectivity::Connected {
            self.check_current_user().await;
        }
        SessionState::update(&self.session, |state| state.loading = false);
        let state = self.state();
        tracing::info!(
            connectivity = ?state.connectivity,
            signed_in = state.is_authenticated(),
            "session initialised"
        );
        state
    }

    /// Probe reachability and record the result. A reconnect with no user
    /// signed in retries [`Self::check_current_user`].
    pub async fn test_backend_connection(&self) -> Connectivity {
        let connectivity = match self.client.probe().await {
            Ok(()) => Connectivity::Connected,
            Err(e) => {
                tracing::warn!("backend unreachable: {e}");
                Connectivity::Disconnected
            }
        };
        let previous = self.connectivity();
        if previous != connectivity {
            tracing::info!(from = ?previous, to = ?connectivity, "connectivity changed");
        }
        SessionState::update(&self.session, |state| state.connectivity = connectivity);
        if previous.is_disconnected() && connectivity == Connectivity::Connected && self.user().is_none() {
            self.check_current_user().await;
        }
        connectivity
    }

    /// Restore the user from the stored credentials.
    pub async fn check_current_user(&self) -> Option<User> {
        if self.client.auth_mode() == AuthMode::Bearer && !self.client.tokens().has_access_token() {
            self.set_user(None);
            return None;
        }
        match self.client.current_user().await {
            Ok(user) => {
                if user.is_none() {
                    tracing::debug!("no current user");
                }
                self.set_user(user.clone());
                user
            }
            Err(e) if e.is_network() => {
                tracing::warn!("could not verify session: {e}");
                self.set_user(None);
                None
            }
            Err(e) => {
                tracing::info!("stored session rejected: {e}");
                self.client.tokens().clear();
                self.set_user(None);
                None
            }
        }
    }

    /// Store the credentials of a login/registration response and resolve the user.
    async fn establish(&self, response: AuthResponse) -> Result<User, ApiError> {
        if let Some(tokens) = &response.tokens {
            self.client.tokens().set_tokens(&tokens.access, &tokens.refresh);
        }
        let user = match response.user {
            Some(user) => user,
            None => match self.client.current_user().await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    self.client.tokens().clear();
                    return Err(ApiError::Unauthorized("Login failed".to_string()));
                }
                Err(e) => {
                    self.client.tokens().clear();
                    return Err(e);
                }
            },
        };
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Sign in. Stored tokens are untouched unless the login succeeds.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        if self.test_backend_connection().await == Connectivity::Disconnected {
            return Err(ApiError::Network("backend unreachable".to_string()));
        }
        let response = self.client.login(username, password).await.map_err(|e| {
            tracing::info!(username, "login failed: {e}");
            e
        })?;
        if self.client.auth_mode() == AuthMode::Bearer && response.tokens.is_none() {
            return Err(ApiError::Unauthorized("Login failed".to_string()));
        }
        let user = self.establish(response).await?;
        tracing::info!(username = %user.username, "signed in");
        Ok(user)
    }

    /// Create an account. Signs in when the backend hands out tokens.
    pub async fn register(&self, registration: &Registration) -> Result<Registered, ApiError> {
        let response = self.client.register(registration).await?;
        if response.tokens.is_none() {
            tracing::info!(username = %registration.username, "account created");
            return Ok(Registered::AccountCreated);
        }
        let user = self.establish(response).await?;
        tracing::info!(username = %user.username, "registered and signed in");
        Ok(Registered::SignedIn(user))
    }

    /// Best-effort server logout, then always drop the local session.
    pub async fn logout(&self) {
        let refresh = self.client.tokens().refresh_token();
        if let Err(e) = self.client.logout(refresh.as_deref()).await {
            tracing::warn!("server logout failed: {e}");
        }
        self.client.tokens().clear();
        self.set_user(None);
        tracing::info!("signed out");
    }
}
