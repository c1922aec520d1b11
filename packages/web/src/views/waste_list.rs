use dioxus::prelude::*;

use ui::views::WasteListView;

use crate::Route;

#[component]
pub fn WasteList() -> Element {
    let nav = use_navigator();

    rsx! {
        WasteListView {
            on_log_waste: move |_| {
                nav.push(Route::LogWaste {});
            },
        }
    }
}
