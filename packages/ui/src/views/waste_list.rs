use api::state::remove_entry;
use api::WasteEntry;
use dioxus::prelude::*;

use crate::icons::FaTrash;
use crate::session::use_session;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Table of all logged entries with delete.
#[component]
pub fn WasteListView(on_log_waste: EventHandler<()>) -> Element {
    let session = use_session();
    let mut entries = use_signal(Vec::<WasteEntry>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);
    let mut deleting = use_signal(|| Option::<i64>::None);

    let loader_session = session.clone();
    let _loader = use_resource(move || {
        let session = loader_session.clone();
        async move {
            match session.client().waste_entries().await {
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

    // The row goes away locally; the list is not fetched again.
    let handle_delete = use_callback(move |id: i64| {
        let session = session.clone();
        spawn(async move {
            error.set(None);
            deleting.set(Some(id));
            match session.client().delete_waste_entry(id).await {
                Ok(()) => {
                    remove_entry(&mut entries.write(), id);
                }
                Err(e) => {
                    tracing::error!("Failed to delete entry {}: {}", id, e);
                    error.set(Some(e.user_message()));
                }
            }
            session.sync();
            deleting.set(None);
        });
    });

    if loading() {
        return rsx! {
            div { class: "page-loading", "Loading entries..." }
        };
    }

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page waste-list",

            div {
                class: "page-header",
                h1 { class: "page-title", "Waste History" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_log_waste.call(()),
                    "Log New Waste"
                }
            }

            if let Some(err) = error() {
                div { class: "alert alert-error", "{err}" }
            }

            if entries.read().is_empty() {
                div {
                    class: "panel empty-state",
                    p { "No waste entries yet. Start logging your waste to see it here." }
                }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Date" }
                            th { "Type" }
                            th { "Quantity" }
                            th { "Description" }
                            th { "" }
                        }
                    }
                    tbody {
                        for entry in entries() {
                            tr {
                                key: "{entry.id}",
                                td { "{entry.date}" }
                                td { "{entry.waste_type_name}" }
                                td { "{entry.quantity_label()}" }
                                td { "{entry.description_or_dash()}" }
                                td {
                                    button {
                                        class: "btn btn-danger btn-small",
                                        title: "Delete entry",
                                        disabled: deleting() == Some(entry.id),
                                        onclick: move |_| handle_delete.call(entry.id),
                                        Icon { icon: FaTrash, width: 12, height: 12 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
