//! Session context and hooks for the UI.

use std::time::Duration;

use api::{ApiClient, ReqwestTransport, SessionManager, SessionState};
use dioxus::prelude::*;
use store::WasteWiseConfig;

/// Token storage of the running platform: `localStorage` in the browser,
/// memory elsewhere.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type BrowserStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type BrowserStore = store::MemoryStore;

pub type Client = ApiClient<ReqwestTransport, BrowserStore>;
pub type Session = SessionManager<ReqwestTransport, BrowserStore>;

/// The session manager plus the reactive copy of its state.
#[derive(Clone)]
pub struct SessionContext {
    manager: Session,
    state: Signal<SessionState>,
}

impl SessionContext {
    pub fn manager(&self) -> &Session {
        &self.manager
    }

    /// The gateway used by the data views.
    pub fn client(&self) -> &Client {
        self.manager.client()
    }

    /// Copy the manager's state into the signal, if it changed.
    ///
    /// Call after any gateway operation: an expired session clears the user
    /// inside the gateway and the guards only see it through the signal.
    pub fn sync(&self) {
        let mut state = self.state;
        let next = self.manager.state();
        if *state.peek() != next {
            state.set(next);
        }
    }
}

/// Get the session context provided by [`SessionProvider`].
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Get the current session state.
/// Returns a signal that updates on login, logout, expiry and connectivity changes.
pub fn use_session_state() -> Signal<SessionState> {
    use_session().state
}

/// Get the client configuration.
pub fn use_config() -> WasteWiseConfig {
    use_context::<WasteWiseConfig>()
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Provider component that owns the session.
/// Wrap your router with this component.
#[component]
pub fn SessionProvider(config: WasteWiseConfig, children: Element) -> Element {
    let api_config = config.api.clone();
    let manager = use_hook(move || {
        Session::new(ApiClient::from_config(
            &api_config,
            ReqwestTransport::new(),
            BrowserStore::new(),
        ))
    });
    let state = use_signal(SessionState::default);
    let session = use_context_provider(|| SessionContext { manager, state });
    let interval = config.connectivity.probe_interval_secs;
    use_context_provider(|| config);

    // Probe and restore the user on mount
    let startup = session.clone();
    let _ = use_resource(move || {
        let session = startup.clone();
        async move {
            session.manager.init().await;
            session.sync();
        }
    });

    // Periodic connectivity check
    let probe = session.clone();
    use_effect(move || {
        if interval == 0 {
            return;
        }
        let session = probe.clone();
        spawn(async move {
            loop {
                sleep(Duration::from_secs(u64::from(interval))).await;

                // Startup runs its own probe
                if session.state.peek().loading {
                    continue;
                }
                session.manager.test_backend_connection().await;
                session.sync();
            }
        });
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let session = session.clone();
        async move {
            busy.set(true);
            session.manager().logout().await;
            session.sync();
            busy.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
