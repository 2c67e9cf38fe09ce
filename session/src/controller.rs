//! Analysis session controller.
//!
//! DESIGN
//! ======
//! `AnalysisSession` is the one object that owns session state: the catalog,
//! the conversation log, the free-text draft, and the in-flight request.
//! Front ends hold it by value (or inside a reactive signal) and drive it
//! through methods; nothing here is global.
//!
//! A submission is a two-phase commit:
//!
//! 1. `begin_analysis` / `begin_submit_draft` echo the user entry into the
//!    log and mark the session busy, returning a [`PendingAnalysis`] ticket.
//! 2. `finish_analysis` consumes the ticket and appends exactly one bot entry
//!    (the report, or an error-shaped report) and clears the busy flag.
//!
//! Reactive front ends run the network call between the two phases
//! themselves. `analyze` and `submit_draft` compose both phases around the
//! single await for callers that can hold `&mut self` across it.
//!
//! CONCURRENCY
//! ===========
//! At most one analysis is in flight. A submission while busy is rejected
//! with [`SubmitError::Busy`] and leaves the log untouched. Each ticket
//! carries a [`RequestId`] so a completion can only close the request that
//! opened it.

use std::fmt;

use crate::api::{AnalysisApi, AnalysisReport, AnalysisRequestError, RequestFailure};
use crate::catalog::CatalogStore;
use crate::conversation::{ConversationEntry, ConversationLog};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Label for the submit affordance when idle.
pub const SEND_LABEL: &str = "Send";
/// Label for the submit affordance while a request is in flight.
pub const ANALYZING_LABEL: &str = "Analyzing...";

// =============================================================================
// TYPES
// =============================================================================

/// Per-session sequence number of an analysis request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a submission was not accepted. Rejections never touch the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("an analysis is already in progress")]
    Busy,
    #[error("product name is empty")]
    EmptyInput,
}

/// Ticket for an analysis between dispatch and resolution.
///
/// Not `Clone`: a ticket can be finished exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending analysis must be passed to `finish_analysis`"]
pub struct PendingAnalysis {
    id: RequestId,
    product_name: String,
}

impl PendingAnalysis {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct AnalysisSession {
    catalog: CatalogStore,
    log: ConversationLog,
    draft: String,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl AnalysisSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    #[must_use]
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// True strictly between dispatch and resolution of a request.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Whether the manual-text submit affordance should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.draft.trim().is_empty()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() { ANALYZING_LABEL } else { SEND_LABEL }
    }

    // -------------------------------------------------------------------------
    // Phase one: dispatch
    // -------------------------------------------------------------------------

    /// Start analyzing `product_name` (catalog selection path).
    ///
    /// Appends the user entry and marks the session busy. The draft is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Busy`] while another request is in flight,
    /// [`SubmitError::EmptyInput`] for a blank name.
    pub fn begin_analysis(&mut self, product_name: &str) -> Result<PendingAnalysis, SubmitError> {
        if self.in_flight.is_some() {
            log::debug!("session: submission rejected while busy");
            return Err(SubmitError::Busy);
        }
        let name = product_name.trim();
        if name.is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let id = RequestId(self.next_request);
        self.next_request += 1;

        self.log.append(ConversationEntry::user(name));
        self.in_flight = Some(id);
        log::info!("session: analysis {id} dispatched for {name:?}");

        Ok(PendingAnalysis { id, product_name: name.to_owned() })
    }

    /// Start analyzing the current draft (manual text path).
    ///
    /// The trimmed draft becomes the product name and the draft is cleared
    /// once the submission is accepted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::begin_analysis`]; the draft is kept on rejection.
    pub fn begin_submit_draft(&mut self) -> Result<PendingAnalysis, SubmitError> {
        let draft = self.draft.clone();
        let pending = self.begin_analysis(&draft)?;
        self.draft.clear();
        Ok(pending)
    }

    // -------------------------------------------------------------------------
    // Phase two: resolution
    // -------------------------------------------------------------------------

    /// Resolve an in-flight analysis.
    ///
    /// Appends the report on success, or an error-shaped report carrying the
    /// failure message, then clears the busy flag. Returns `false` (and
    /// changes nothing) if the ticket does not belong to the in-flight
    /// request.
    pub fn finish_analysis(
        &mut self,
        pending: PendingAnalysis,
        outcome: Result<AnalysisReport, AnalysisRequestError>,
    ) -> bool {
        if self.in_flight != Some(pending.id) {
            log::warn!("session: ignoring completion for stale request {}", pending.id);
            return false;
        }

        let report = match outcome {
            Ok(report) => {
                log::info!("session: analysis {} resolved: risk={}", pending.id, report.risk_level);
                report
            }
            Err(e) => {
                log::warn!("session: analysis {} failed: {e}", pending.id);
                AnalysisReport::from_failure(e.to_string())
            }
        };

        self.log.append(ConversationEntry::Bot(report));
        self.in_flight = None;
        true
    }

    // -------------------------------------------------------------------------
    // Composite operations
    // -------------------------------------------------------------------------

    /// Analyze `product_name` end to end through `api`.
    ///
    /// Returns the request id once the bot entry has been appended. If this
    /// future is dropped before the response arrives, the request is closed
    /// with a cancellation entry.
    ///
    /// # Errors
    ///
    /// Only submission rejections; request failures land in the log.
    pub async fn analyze<A>(&mut self, api: &A, product_name: &str) -> Result<RequestId, SubmitError>
    where
        A: AnalysisApi + ?Sized,
    {
        let pending = self.begin_analysis(product_name)?;
        Ok(self.run(api, pending).await)
    }

    /// Submit the current draft end to end through `api`.
    ///
    /// # Errors
    ///
    /// Only submission rejections; request failures land in the log.
    pub async fn submit_draft<A>(&mut self, api: &A) -> Result<RequestId, SubmitError>
    where
        A: AnalysisApi + ?Sized,
    {
        let pending = self.begin_submit_draft()?;
        Ok(self.run(api, pending).await)
    }

    async fn run<A>(&mut self, api: &A, pending: PendingAnalysis) -> RequestId
    where
        A: AnalysisApi + ?Sized,
    {
        let id = pending.id;
        let name = pending.product_name.clone();
        let mut guard = InFlight { session: self, pending: Some(pending) };
        let outcome = api.analyze_product(&name).await;
        guard.resolve(outcome);
        id
    }
}

/// Closes an in-flight request on drop, so an abandoned future still yields
/// exactly one bot entry and clears the busy flag.
struct InFlight<'a> {
    session: &'a mut AnalysisSession,
    pending: Option<PendingAnalysis>,
}

impl InFlight<'_> {
    fn resolve(&mut self, outcome: Result<AnalysisReport, AnalysisRequestError>) {
        if let Some(pending) = self.pending.take() {
            self.session.finish_analysis(pending, outcome);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.resolve(Err(RequestFailure::Cancelled.into()));
    }
}
