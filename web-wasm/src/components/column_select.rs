//! Column dropdown for one analysis field

use leptos::prelude::*;
use patent_analysis_common::ColumnField;
use crate::app::SessionSignal;

#[component]
pub fn ColumnSelect(field: ColumnField, session: SessionSignal) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let value = if value.is_empty() { None } else { Some(value) };
        session.update(|s| {
            if let Err(err) = s.set_column(field, value) {
                gloo::console::warn!(err.to_string());
            }
        });
    };

    let options = move || {
        session.with(|s| {
            s.columns()
                .iter()
                .map(|column| {
                    let disabled = s.is_option_disabled(field, column);
                    let selected = s.column(field) == Some(column.as_str());
                    view! {
                        <option value=column.clone() disabled=disabled selected=selected>
                            {column.clone()}
                        </option>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="form-group">
            <label for=field.element_id()>{field.label()}</label>
            <select
                id=field.element_id()
                name=field.form_name()
                disabled=move || !session.with(|s| s.can_edit_columns())
                prop:value=move || session.with(|s| s.column(field).unwrap_or_default().to_string())
                on:change=on_change
            >
                <option value="">"-- Select Column --"</option>
                {options}
            </select>
        </div>
    }
}
