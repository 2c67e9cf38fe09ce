//! Free-text product input with the submit button.

use leptos::prelude::*;
use session::AnalysisSession;

use crate::actions;
use crate::net::api::BrowserAnalysisClient;

const PLACEHOLDER: &str = "Enter product name or ingredients...";

/// Input form. The button is disabled while a request is in flight or the
/// draft is blank, and reads "Analyzing..." while busy.
#[component]
pub fn PromptBar() -> impl IntoView {
    let session = expect_context::<RwSignal<AnalysisSession>>();
    let api = expect_context::<BrowserAnalysisClient>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        actions::submit_draft(session, api);
    };

    view! {
        <form class="chat-input" on:submit=on_submit>
            <input
                type="text"
                placeholder=PLACEHOLDER
                prop:value=move || session.with(|s| s.draft().to_owned())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    session.update(|s| s.set_draft(text));
                }
            />
            <button type="submit" disabled=move || !session.with(AnalysisSession::can_submit)>
                {move || session.with(AnalysisSession::submit_label)}
            </button>
        </form>
    }
}
