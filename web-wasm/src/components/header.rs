//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Patent Analysis"</h1>
            <p class="text-muted">"Upload a patent spreadsheet, pick the text columns and run the analysis."</p>
        </header>
    }
}
