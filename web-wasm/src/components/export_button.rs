//! CSVダウンロードボタン

use leptos::prelude::*;
use crate::app::SessionSignal;
use crate::export::download_csv;

#[component]
pub fn ExportButton(session: SessionSignal) -> impl IntoView {
    let on_click = move |_| {
        let Some(export) = session.with(|s| s.export_csv()) else {
            return;
        };
        if let Err(err) = download_csv(&export) {
            gloo::console::error!("CSV download failed", err);
        }
    };

    view! {
        <div class="export-buttons">
            <button
                class="btn btn-secondary"
                disabled=move || session.with(|s| s.results().is_empty() || s.is_busy())
                on:click=on_click
            >
                "Export CSV"
            </button>
        </div>
    }
}
