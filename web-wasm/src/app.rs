//! メインアプリケーションコンポーネント
//!
//! Owns the upload session signal and performs the two backend calls. Each
//! call carries the request token the session issued; the outcome is handed
//! back with it so a response for a replaced file is dropped.

use leptos::prelude::*;
use leptos::task::spawn_local;
use patent_analysis_common::view::results_footer;
use patent_analysis_common::{Completion, ResultView, UploadSession};
use web_sys::File;
use crate::api::{self, backend};
use crate::components::{
    export_button::ExportButton,
    header::Header,
    results_summary::ResultsSummary,
    results_table::ResultsTable,
    upload_form::UploadForm,
};

pub type Session = UploadSession<File>;

/// `web_sys::File` is not `Send`, so the session lives in local storage
pub type SessionSignal = RwSignal<Session, LocalStorage>;

fn log_stale(completion: Completion, what: &str) {
    if completion == Completion::Stale {
        gloo::console::log!(format!("discarded stale {} response", what));
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(Session::new());
    let (view_mode, set_view_mode) = signal(ResultView::Full);

    // ファイル選択ハンドラ
    let on_file_selected = move |file: Option<File>| {
        let Some(file) = file else {
            session.update(|s| s.clear_file());
            return;
        };
        let Some(request) = session.try_update(|s| s.select_file(file)) else {
            return;
        };

        spawn_local(async move {
            let outcome = backend::fetch_columns(&api::api_base(), &request.file).await;
            if let Err(detail) = &outcome {
                gloo::console::error!("Error fetching columns:", detail.clone());
            }
            session.update(|s| log_stale(s.columns_loaded(request.token, outcome), "columns"));
        });
    };

    // 解析開始ハンドラ
    let on_submit = move |_| {
        let request = match session.try_update(|s| s.submit()) {
            Some(Ok(request)) => request,
            _ => return,
        };

        spawn_local(async move {
            let outcome = backend::analyze(&api::api_base(), &request).await;
            if let Err(detail) = &outcome {
                gloo::console::error!("Error during analysis:", detail.clone());
            }
            session.update(|s| log_stale(s.analysis_finished(request.token, outcome), "analysis"));
        });
    };

    let has_results = move || session.with(|s| !s.results().is_empty());

    let results = move || match view_mode.get() {
        ResultView::Full => session
            .with(|s| s.full_table())
            .map(|table| view! { <ResultsTable table=table /> }.into_any()),
        ResultView::Summary => session
            .with(|s| s.summary_rows())
            .map(|rows| view! { <ResultsSummary rows=rows /> }.into_any()),
    };

    view! {
        <div class="container">
            <Header />

            <UploadForm
                session=session
                on_file_selected=on_file_selected
                on_submit=on_submit
            />

            <Show when=has_results>
                <section class="results">
                    <div class="view-toggle">
                        <button
                            class=move || if view_mode.get() == ResultView::Full { "btn active" } else { "btn" }
                            on:click=move |_| set_view_mode.set(ResultView::Full)
                        >
                            "Full table"
                        </button>
                        <button
                            class=move || if view_mode.get() == ResultView::Summary { "btn active" } else { "btn" }
                            on:click=move |_| set_view_mode.set(ResultView::Summary)
                        >
                            "Summary"
                        </button>
                    </div>

                    {results}

                    <p class="text-muted">
                        {move || session.with(|s| results_footer(s.results().len()))}
                    </p>

                    <ExportButton session=session />
                </section>
            </Show>
        </div>
    }
}
