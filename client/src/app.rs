//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use session::AnalysisSession;

use crate::actions;
use crate::components::{catalog_panel::CatalogPanel, conversation_view::ConversationView, prompt_bar::PromptBar};
use crate::net::api::BrowserAnalysisClient;

/// Root application component.
///
/// Owns the single analysis session for the page and starts the one-time
/// catalog fetch.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(AnalysisSession::new());
    let api = BrowserAnalysisClient::from_build_env();

    provide_context(session);
    provide_context(api);

    actions::load_catalog(session, api);

    view! {
        <Title text="AllerPredict"/>

        <div class="chat-app">
            <header class="chat-header">
                <h1>"AllerPredict"</h1>
            </header>
            <div class="chat-layout">
                <CatalogPanel/>
                <main class="chat-main">
                    <ConversationView/>
                    <PromptBar/>
                </main>
            </div>
        </div>
    }
}
