//! Full result table (every key of the first record)

use leptos::prelude::*;
use patent_analysis_common::ResultTable;

#[component]
pub fn ResultsTable(table: ResultTable) -> impl IntoView {
    let ResultTable { headers, rows, .. } = table;

    view! {
        <div class="table-wrapper">
            <table class="results-table">
                <thead>
                    <tr>
                        {headers.into_iter().map(|header| view! { <th>{header}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    {row
                                        .into_iter()
                                        .map(|cell| view! { <td title=cell.full>{cell.text}</td> })
                                        .collect_view()}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
