//! Backend connectivity banner.

use api::Connectivity;
use dioxus::prelude::*;

use crate::icons::{FaCloud, FaTriangleExclamation};
use crate::session::{use_session, use_session_state};
use crate::Icon;

/// Banner shown while the backend is being checked or is unreachable.
///
/// - **checking**: a small muted notice
/// - **disconnected**: a warning with a retry button; protected pages stay
///   open in this state
/// - **connected**: nothing
#[component]
pub fn ConnectionStatus() -> Element {
    let session = use_session();
    let state = use_session_state();
    let mut retrying = use_signal(|| false);

    let retry = move |_| {
        let session = session.clone();
        async move {
            retrying.set(true);
            session.manager().test_backend_connection().await;
            session.sync();
            retrying.set(false);
        }
    };

    match state().connectivity {
        Connectivity::Connected => rsx! {},
        Connectivity::Checking => rsx! {
            div {
                class: "connection-status connection-status--checking",
                Icon { icon: FaCloud, width: 14, height: 14 }
                span { "Checking connection to server..." }
            }
        },
        Connectivity::Disconnected => rsx! {
            div {
                class: "connection-status connection-status--offline",
                role: "alert",
                Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                span {
                    "Cannot connect to server. Please make sure the WasteWise backend is running. "
                    "Some features may be unavailable."
                }
                button {
                    class: "btn btn-small",
                    disabled: retrying(),
                    onclick: retry,
                    if retrying() { "Checking..." } else { "Retry" }
                }
            }
        },
    }
}
