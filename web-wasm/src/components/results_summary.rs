//! Summary view: score, summary, reasoning and follow-up per patent

use leptos::prelude::*;
use patent_analysis_common::view::SUMMARY_HEADERS;
use patent_analysis_common::SummaryRow;

#[component]
pub fn ResultsSummary(rows: Vec<SummaryRow>) -> impl IntoView {
    view! {
        <table class="results-table summary">
            <thead>
                <tr>
                    {SUMMARY_HEADERS.iter().map(|header| view! { <th>{*header}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let follow_up_class = if row.follow_up == "Yes" { "follow-up yes" } else { "follow-up no" };
                        view! {
                            <tr>
                                <td class="score">{row.score}</td>
                                <td>{row.summary}</td>
                                <td>{row.reasoning}</td>
                                <td class=follow_up_class>{row.follow_up}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
