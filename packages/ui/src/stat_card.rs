use dioxus::prelude::*;

/// A single figure with a title, as shown on the dashboard and analytics pages.
#[component]
pub fn StatCard(
    title: String,
    value: String,
    #[props(default)] subtitle: Option<String>,
    /// Extra class for the accent colour (`stat-card--green`, ...).
    #[props(default = "".to_string())]
    class: String,
) -> Element {
    rsx! {
        div {
            class: "stat-card {class}",
            p { class: "stat-card-title", "{title}" }
            p { class: "stat-card-value", "{value}" }
            if let Some(subtitle) = subtitle {
                p { class: "stat-card-subtitle", "{subtitle}" }
            }
        }
    }
}
