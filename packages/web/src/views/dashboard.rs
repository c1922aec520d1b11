use dioxus::prelude::*;

use ui::views::DashboardView;

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();

    rsx! {
        DashboardView {
            on_log_waste: move |_| {
                nav.push(Route::LogWaste {});
            },
            on_view_analytics: move |_| {
                nav.push(Route::Analytics {});
            },
            on_view_history: move |_| {
                nav.push(Route::WasteList {});
            },
        }
    }
}
