use dioxus::prelude::*;

use ui::views::AnalyticsView;

#[component]
pub fn Analytics() -> Element {
    rsx! {
        AnalyticsView {}
    }
}
