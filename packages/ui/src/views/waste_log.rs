use api::state::WasteEntryForm;
use api::{Unit, WasteType};
use dioxus::prelude::*;

use crate::session::use_session;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Form to log a new waste entry.
#[component]
pub fn WasteLogView(on_view_list: EventHandler<()>) -> Element {
    let session = use_session();
    let mut form = use_signal(|| WasteEntryForm::new(today()));
    let mut waste_types = use_signal(Vec::<WasteType>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let loader_session = session.clone();
    let _loader = use_resource(move || {
        let session = loader_session.clone();
        async move {
            match session.client().waste_types().await {
                Ok(types) => waste_types.set(types),
                Err(e) => {
                    tracing::error!("Failed to load waste types: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            session.sync();
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);
            success.set(None);

            let entry = match form.read().to_new_entry() {
                Ok(entry) => entry,
                Err(e) => {
                    error.set(Some(e.user_message()));
                    return;
                }
            };

            submitting.set(true);
            match session.client().create_waste_entry(&entry).await {
                Ok(created) => {
                    tracing::info!(id = created.id, "waste entry logged");
                    success.set(Some("Waste entry logged successfully!".to_string()));
                    form.set(WasteEntryForm::new(today()));
                }
                Err(e) => {
                    tracing::error!("Failed to log waste entry: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            session.sync();
            submitting.set(false);
        });
    };

    let current = form();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page waste-log",

            h1 { class: "page-title", "Log Waste" }

            form {
                class: "panel form",
                onsubmit: handle_submit,

                if let Some(err) = error() {
                    div { class: "alert alert-error", "{err}" }
                }
                if let Some(msg) = success() {
                    div {
                        class: "alert alert-success",
                        "{msg} "
                        button {
                            class: "btn-link",
                            r#type: "button",
                            onclick: move |_| on_view_list.call(()),
                            "View all entries"
                        }
                    }
                }

                label { class: "form-label", r#for: "waste-type", "Waste Type" }
                select {
                    id: "waste-type",
                    class: "form-input",
                    value: "{current.waste_type}",
                    onchange: move |evt: FormEvent| form.write().waste_type = evt.value(),
                    option { value: "", "Select a waste type" }
                    for wt in waste_types() {
                        option {
                            key: "{wt.id}",
                            value: "{wt.id}",
                            selected: current.waste_type == wt.id.to_string(),
                            if wt.recyclable { "{wt.name} (recyclable)" } else { "{wt.name}" }
                        }
                    }
                }

                div {
                    class: "form-row",
                    div {
                        class: "form-field",
                        label { class: "form-label", r#for: "quantity", "Quantity" }
                        input {
                            id: "quantity",
                            class: "form-input",
                            r#type: "number",
                            step: "0.01",
                            min: "0",
                            placeholder: "0.0",
                            value: "{current.quantity}",
                            oninput: move |evt: FormEvent| form.write().quantity = evt.value(),
                        }
                    }
                    div {
                        class: "form-field",
                        label { class: "form-label", r#for: "unit", "Unit" }
                        select {
                            id: "unit",
                            class: "form-input",
                            value: "{current.unit}",
                            onchange: move |evt: FormEvent| form.write().unit = evt.value(),
                            for unit in Unit::ALL {
                                option {
                                    key: "{unit}",
                                    value: "{unit}",
                                    selected: current.unit == unit.as_str(),
                                    "{unit.label()}"
                                }
                            }
                        }
                    }
                }

                label { class: "form-label", r#for: "date", "Date" }
                input {
                    id: "date",
                    class: "form-input",
                    r#type: "date",
                    value: "{current.date}",
                    oninput: move |evt: FormEvent| form.write().date = evt.value(),
                }

                label { class: "form-label", r#for: "description", "Description (optional)" }
                textarea {
                    id: "description",
                    class: "form-input",
                    rows: "3",
                    placeholder: "e.g. plastic bottles from the weekly shop",
                    value: "{current.description}",
                    oninput: move |evt: FormEvent| form.write().description = evt.value(),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Saving..." } else { "Log Waste" }
                }
            }
        }
    }
}
