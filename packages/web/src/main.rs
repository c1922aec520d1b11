use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::WasteWiseConfig;
use ui::guard::{decide, Access, GuardDecision};
use ui::{use_session_state, ConnectionStatus, Navbar, SessionProvider};
use views::{Analytics, Dashboard, Home, LogWaste, Login, Register, WasteList};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[layout(PublicOnly)]
            #[route("/login")]
            Login {},
            #[route("/register")]
            Register {},
        #[end_layout]
        #[layout(Protected)]
            #[route("/dashboard")]
            Dashboard {},
            #[route("/log-waste")]
            LogWaste {},
            #[route("/waste-list")]
            WasteList {},
            #[route("/analytics")]
            Analytics {},
        #[end_layout]
    #[end_layout]
    #[redirect("/old-dashboard", || Route::Dashboard {})]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const CONFIG_TOML: &str = include_str!("../wastewise.toml");

/// Embedded `wastewise.toml`, with the build-time `WASTEWISE_API_URL` override.
fn load_config() -> WasteWiseConfig {
    let config = WasteWiseConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}, using defaults: {}", WasteWiseConfig::filename(), e);
        WasteWiseConfig::default()
    });
    match option_env!("WASTEWISE_API_URL") {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
        _ => config,
    }
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    tracing::debug!(base_url = %config.api.base_url, auth_mode = ?config.api.auth_mode, "client config");

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Navbar and connectivity banner around every page.
#[component]
fn Shell() -> Element {
    let state = use_session_state();
    let signed_in = state().is_authenticated();

    rsx! {
        Navbar {
            if signed_in {
                Link { to: Route::Dashboard {}, active_class: "active", "Dashboard" }
                Link { to: Route::LogWaste {}, active_class: "active", "Log Waste" }
                Link { to: Route::WasteList {}, active_class: "active", "History" }
                Link { to: Route::Analytics {}, active_class: "active", "Analytics" }
            } else {
                Link { to: Route::Home {}, active_class: "active", "Home" }
                Link { to: Route::Login {}, active_class: "active", "Login" }
                Link { to: Route::Register {}, active_class: "active", "Register" }
            }
        }
        ConnectionStatus {}
        Outlet::<Route> {}
    }
}

fn guarded(access: Access) -> Element {
    let state = use_session_state();
    let nav = use_navigator();

    match decide(access, &state()) {
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::Wait => rsx! {
            div { class: "page-loading", "Loading..." }
        },
        GuardDecision::RedirectLogin => {
            nav.replace(Route::Login {});
            rsx! {}
        }
        GuardDecision::RedirectDashboard => {
            nav.replace(Route::Dashboard {});
            rsx! {}
        }
    }
}

/// Signed-in users only, unless the backend is unreachable.
#[component]
fn Protected() -> Element {
    guarded(Access::Protected)
}

/// Login and registration: signed-in users go to the dashboard.
#[component]
fn PublicOnly() -> Element {
    guarded(Access::PublicOnly)
}

/// Unknown paths go home.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("no route for /{}", segments.join("/"));
    nav.replace(Route::Home {});
    rsx! {}
}
