//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod charts;
pub mod guard;
pub mod views;

mod navbar;
pub use navbar::Navbar;

mod session;
pub use session::{
    use_config, use_session, use_session_state, BrowserStore, Client, LogoutButton, Session,
    SessionContext, SessionProvider,
};

mod connection_status;
pub use connection_status::ConnectionStatus;

mod stat_card;
pub use stat_card::StatCard;
