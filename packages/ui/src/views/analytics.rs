use api::state::PeriodSelection;
use api::Period;
use dioxus::prelude::*;

use crate::charts::{BarChart, ChartDatum, PieChart};
use crate::session::use_session;
use crate::StatCard;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Period statistics with bar and pie breakdowns by waste type.
#[component]
pub fn AnalyticsView() -> Element {
    let session = use_session();
    let mut selection = use_signal(PeriodSelection::default);

    // Re-runs whenever the selection signal is written, which only happens
    // when the period actually changes.
    let summary = use_resource(move || {
        let session = session.clone();
        let period = selection().current();
        async move {
            let result = session.client().analytics(period).await;
            if let Err(e) = &result {
                tracing::error!("Failed to load {} analytics: {}", period, e);
            }
            session.sync();
            result
        }
    });

    let select = move |evt: FormEvent| {
        let mut next = *selection.peek();
        if next.select_value(&evt.value()) {
            selection.set(next);
        }
    };

    let current = selection().current();

    let body = match &*summary.read() {
        None => rsx! {
            div { class: "page-loading", "Loading analytics..." }
        },
        Some(Err(e)) => rsx! {
            div { class: "alert alert-error", "{e.user_message()}" }
        },
        Some(Ok(data)) => {
            let breakdown = ChartDatum::from_totals(&data.waste_by_type);
            rsx! {
                div {
                    class: "stat-grid",
                    StatCard {
                        title: "Total Waste",
                        value: format!("{:.1} kg", data.total_waste_kg),
                        subtitle: data.period.label().to_string(),
                        class: "stat-card--green",
                    }
                    StatCard {
                        title: "Total Entries",
                        value: data.total_entries.to_string(),
                        class: "stat-card--blue",
                    }
                    StatCard {
                        title: "CO₂ Saved",
                        value: format!("{:.1} kg", data.co2_saved_kg),
                        class: "stat-card--teal",
                    }
                }

                if breakdown.is_empty() {
                    div {
                        class: "panel empty-state",
                        p { "No waste data for this period" }
                    }
                } else {
                    div {
                        class: "chart-grid",
                        div {
                            class: "panel",
                            h2 { class: "panel-title", "Waste by Type" }
                            BarChart { data: breakdown.clone() }
                        }
                        div {
                            class: "panel",
                            h2 { class: "panel-title", "Distribution" }
                            PieChart { data: breakdown }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page analytics",

            div {
                class: "page-header",
                h1 { class: "page-title", "Analytics" }
                select {
                    class: "form-input period-select",
                    value: "{current}",
                    onchange: select,
                    for period in Period::ALL {
                        option {
                            key: "{period}",
                            value: "{period}",
                            selected: period == current,
                            "{period.label()}"
                        }
                    }
                }
            }

            {body}
        }
    }
}
