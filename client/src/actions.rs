//! Bridges between UI events and the session's two-phase submissions.
//!
//! Phase one runs synchronously inside a signal update so the user's entry
//! and the busy flag render immediately. The request runs on a local task,
//! and phase two lands in a second update when it resolves.

use leptos::prelude::*;
use session::api::AnalysisApi;
use session::{AnalysisSession, PendingAnalysis};

use crate::net::api::BrowserAnalysisClient;

/// Fetch the catalog once and record the result in the session.
pub fn load_catalog(session: RwSignal<AnalysisSession>, api: BrowserAnalysisClient) {
    leptos::task::spawn_local(async move {
        let result = api.fetch_products().await;
        session.update(|s| s.catalog_mut().apply_load(result));
    });
}

/// Submit the typed draft. Blank drafts and busy sessions are no-ops.
pub fn submit_draft(session: RwSignal<AnalysisSession>, api: BrowserAnalysisClient) {
    let mut pending = None;
    session.update(|s| match s.begin_submit_draft() {
        Ok(p) => pending = Some(p),
        Err(e) => log::debug!("draft not submitted: {e}"),
    });
    if let Some(pending) = pending {
        dispatch(session, api, pending);
    }
}

/// Analyze a product picked from the catalog.
pub fn analyze_product(session: RwSignal<AnalysisSession>, api: BrowserAnalysisClient, name: String) {
    let mut pending = None;
    session.update(|s| match s.begin_analysis(&name) {
        Ok(p) => pending = Some(p),
        Err(e) => log::debug!("selection not analyzed: {e}"),
    });
    if let Some(pending) = pending {
        dispatch(session, api, pending);
    }
}

fn dispatch(session: RwSignal<AnalysisSession>, api: BrowserAnalysisClient, pending: PendingAnalysis) {
    leptos::task::spawn_local(async move {
        let outcome = api.analyze_product(pending.product_name()).await;
        session.update(|s| {
            s.finish_analysis(pending, outcome);
        });
    });
}
