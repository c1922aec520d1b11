use dioxus::prelude::*;

use crate::session::{use_session_state, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar. Platform crates pass their router links as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    let state = use_session_state();
    let user = state().user;

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-brand", "WasteWise" }
            div {
                class: "navbar-links",
                {children}
            }
            if let Some(user) = user {
                div {
                    class: "navbar-user",
                    span { class: "navbar-avatar", "{user.initial()}" }
                    span { "{user.display_name()}" }
                    LogoutButton { class: "btn btn-outline btn-small" }
                }
            }
        }
    }
}
