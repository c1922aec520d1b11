use dioxus::prelude::*;

use ui::views::WasteLogView;

use crate::Route;

#[component]
pub fn LogWaste() -> Element {
    let nav = use_navigator();

    rsx! {
        WasteLogView {
            on_view_list: move |_| {
                nav.push(Route::WasteList {});
            },
        }
    }
}
