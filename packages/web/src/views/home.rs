use dioxus::prelude::*;
use ui::use_session_state;

use crate::Route;

/// Landing page.
#[component]
pub fn Home() -> Element {
    let state = use_session_state();
    let signed_in = state().is_authenticated();

    rsx! {
        div {
            class: "page home",
            style: "align-items: center; text-align: center; padding-top: 4rem;",

            h1 {
                style: "font-size: 2.25rem; margin: 0; color: #15803d;",
                "WasteWise"
            }
            p {
                style: "max-width: 520px; color: #4b5563; font-size: 1.0625rem;",
                "Log what your household throws away, see where it comes from, "
                "and track how much CO₂ recycling saves."
            }

            div {
                class: "quick-actions",
                style: "justify-content: center;",
                if signed_in {
                    Link { class: "btn btn-primary", to: Route::Dashboard {}, "Go to dashboard" }
                } else {
                    Link { class: "btn btn-primary", to: Route::Register {}, "Get started" }
                    Link { class: "btn btn-outline", to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
