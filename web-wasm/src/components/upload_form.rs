//! アップロードフォーム
//!
//! File picker, column dropdowns, prompt editor and submit button. All state
//! lives in the session signal; this component only forwards user actions.

use leptos::prelude::*;
use patent_analysis_common::api::ACCEPT_ATTRIBUTE;
use patent_analysis_common::{ColumnField, Status};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};
use crate::app::SessionSignal;
use crate::components::column_select::ColumnSelect;

#[component]
pub fn UploadForm<FS, FU>(
    session: SessionSignal,
    on_file_selected: FS,
    on_submit: FU,
) -> impl IntoView
where
    FS: Fn(Option<File>) + 'static + Clone,
    FU: Fn(()) + 'static + Clone,
{
    let file_input: NodeRef<leptos::html::Input> = NodeRef::new();

    let on_change = {
        let on_file_selected = on_file_selected.clone();
        move |ev: web_sys::Event| {
            let file = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            on_file_selected(file);
        }
    };

    let on_clear = {
        let on_file_selected = on_file_selected.clone();
        move |_| {
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
            on_file_selected(None);
        }
    };

    let on_form_submit = {
        let on_submit = on_submit.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            on_submit(());
        }
    };

    let has_file = move || session.with(|s| s.file().is_some());
    let status = move || session.with(|s| s.status().clone());

    view! {
        <form class="upload-form" on:submit=on_form_submit>
            <div class="form-group">
                <label for="patent-file">"Patent Spreadsheet"</label>
                <input
                    id="patent-file"
                    type="file"
                    accept=ACCEPT_ATTRIBUTE
                    node_ref=file_input
                    disabled=move || !session.with(|s| s.can_select_file())
                    on:change=on_change
                />
                <button
                    type="button"
                    class="btn btn-secondary"
                    disabled=move || !has_file() || !session.with(|s| s.can_select_file())
                    on:click=on_clear
                >
                    "Clear"
                </button>
                <Show when=move || status() == Status::LoadingColumns>
                    <p class="text-muted">"Loading columns..."</p>
                </Show>
            </div>

            {ColumnField::ALL
                .into_iter()
                .map(|field| view! { <ColumnSelect field=field session=session /> })
                .collect_view()}

            <div class="form-group">
                <label for="custom-prompt">"Analysis Prompt"</label>
                <textarea
                    id="custom-prompt"
                    rows="6"
                    prop:value=move || session.with(|s| s.prompt().to_string())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        session.update(|s| s.set_prompt(text));
                    }
                ></textarea>
            </div>

            <Show when=move || session.with(|s| s.error_message().is_some())>
                <p class="error" role="alert">
                    {move || session.with(|s| s.error_message().unwrap_or_default().to_string())}
                </p>
            </Show>

            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || !session.with(|s| s.can_submit())
            >
                {move || if status() == Status::Submitting { "Analyzing..." } else { "Analyze Patents" }}
            </button>
        </form>
    }
}
