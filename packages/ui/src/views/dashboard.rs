use api::state::{DashboardStats, RECENT_ENTRIES_SHOWN};
use api::{AnalyticsSummary, Period, WasteEntry};
use dioxus::prelude::*;

use crate::charts::{BarChart, ChartDatum};
use crate::session::{use_config, use_session};
use crate::StatCard;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Weekly overview: totals, goal progress, breakdown and recent entries.
///
/// Platform packages pass the navigation targets of the quick actions.
#[component]
pub fn DashboardView(
    on_log_waste: EventHandler<()>,
    on_view_analytics: EventHandler<()>,
    on_view_history: EventHandler<()>,
) -> Element {
    let session = use_session();
    let goal_kg = use_config().dashboard.weekly_goal_kg;
    let mut summary = use_signal(|| Option::<AnalyticsSummary>::None);
    let mut entries = use_signal(Vec::<WasteEntry>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);

    // Both requests run together; each fills its own slice of state.
    let _loader = use_resource(move || {
        let session = session.clone();
        async move {
            let client = session.client();
            let (analytics, list) =
                futures::join!(client.analytics(Period::Week), client.waste_entries());
            match analytics {
                Ok(a) => summary.set(Some(a)),
                Err(e) => {
                    tracing::error!("Failed to load weekly analytics: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            match list {
                Ok(list) => entries.set(list),
                Err(e) => {
                    tracing::error!("Failed to load waste entries: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            session.sync();
            loading.set(false);
        }
    });

    if loading() {
        return rsx! {
            div { class: "page-loading", "Loading your dashboard..." }
        };
    }

    let stats = DashboardStats::from_parts(summary().as_ref(), &entries(), goal_kg);
    let breakdown = summary()
        .map(|s| ChartDatum::from_totals(&s.waste_by_type))
        .unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page dashboard",

            h1 { class: "page-title", "Dashboard" }

            if let Some(err) = error() {
                div { class: "alert alert-error", "{err}" }
            }

            div {
                class: "stat-grid",
                StatCard {
                    title: "Total Waste (This Week)",
                    value: format!("{:.1} kg", stats.total_waste_kg),
                    class: "stat-card--green",
                }
                StatCard {
                    title: "Total Entries",
                    value: stats.total_entries.to_string(),
                    class: "stat-card--blue",
                }
                StatCard {
                    title: "CO₂ Saved",
                    value: format!("{:.1} kg", stats.co2_saved_kg),
                    class: "stat-card--teal",
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "Weekly Goal Progress" }
                div {
                    class: "progress",
                    div {
                        class: "progress-bar",
                        style: "width: {stats.goal_progress:.0}%;",
                    }
                }
                p {
                    class: "muted",
                    "{stats.total_waste_kg:.1} kg of {goal_kg:.0} kg target ({stats.goal_progress:.0}%)"
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "Weekly Breakdown" }
                if breakdown.is_empty() {
                    div {
                        class: "empty-state",
                        p { "No waste data yet" }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| on_log_waste.call(()),
                            "Log your first entry"
                        }
                    }
                } else {
                    BarChart { data: breakdown }
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "Recent Entries" }
                if stats.recent.is_empty() {
                    p { class: "muted", "No entries yet" }
                } else {
                    ul {
                        class: "recent-list",
                        for entry in stats.recent.iter().take(RECENT_ENTRIES_SHOWN) {
                            li {
                                key: "{entry.id}",
                                span { class: "recent-type", "{entry.waste_type_name}" }
                                span { class: "recent-qty", "{entry.quantity_label()}" }
                                span { class: "recent-date muted", "{entry.date}" }
                            }
                        }
                    }
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "Quick Actions" }
                div {
                    class: "quick-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_log_waste.call(()),
                        "Log New Waste"
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| on_view_analytics.call(()),
                        "View Analytics"
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| on_view_history.call(()),
                        "Waste History"
                    }
                }
            }
        }
    }
}
