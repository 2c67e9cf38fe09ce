//! Conversation log rendering.

use leptos::prelude::*;
use session::render::{REPORT_HEADING, format_allergens, format_score};
use session::{AnalysisReport, AnalysisSession, ConversationEntry};

/// Chat window showing every entry of the conversation log.
#[component]
pub fn ConversationView() -> impl IntoView {
    let session = expect_context::<RwSignal<AnalysisSession>>();

    view! {
        <div class="chat-window">
            {move || {
                let entries = session.with(|s| s.log().all().to_vec());
                if entries.is_empty() {
                    return view! {
                        <div class="chat-window__empty">"Ask about a product to get started"</div>
                    }
                        .into_any();
                }

                entries.into_iter().map(entry_view).collect::<Vec<_>>().into_any()
            }}
        </div>
    }
}

fn entry_view(entry: ConversationEntry) -> AnyView {
    match entry {
        ConversationEntry::User { text } => view! { <div class="chat-bubble user">{text}</div> }.into_any(),
        ConversationEntry::Bot(report) => report_view(report),
    }
}

fn report_view(report: AnalysisReport) -> AnyView {
    let is_error = report.is_error();
    let allergens = format_allergens(&report.detected_allergens);
    let score = format_score(report.ethical_score);
    let risk = report.risk_level;
    let recommendations = report
        .recommendations
        .into_iter()
        .map(|rec| view! { <li>{rec}</li> })
        .collect::<Vec<_>>();

    view! {
        <div class="chat-bubble bot" class:chat-bubble--error=is_error>
            <strong>{REPORT_HEADING}</strong>
            <div>
                <strong>"Detected Allergens:"</strong>
                " "
                {allergens}
            </div>
            <div>
                <strong>"Risk Level:"</strong>
                " "
                {risk}
            </div>
            <div>
                <strong>"Ethical Score:"</strong>
                " "
                {score}
            </div>
            <div>
                <strong>"Recommendations:"</strong>
                <ul>{recommendations}</ul>
            </div>
        </div>
    }
    .into_any()
}
