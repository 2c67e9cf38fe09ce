//! Client-side analysis session for the AllerPredict product checker.
//!
//! This crate owns the interaction state shared by the web (`client`) and
//! terminal (`allerpredict`) front ends: the product catalog with its search
//! filter, the append-only conversation log, and the controller that runs one
//! analysis request per submission. It knows nothing about rendering or about
//! which HTTP stack carries requests; transports plug in via [`AnalysisApi`].

pub mod api;
pub mod catalog;
pub mod controller;
pub mod conversation;
pub mod render;

pub use api::{AnalysisApi, AnalysisReport, AnalysisRequestError, CatalogLoadError, RequestFailure};
pub use catalog::{CatalogStatus, CatalogStore, Product, filter_products};
pub use controller::{AnalysisSession, PendingAnalysis, RequestId, SubmitError};
pub use conversation::{ConversationEntry, ConversationLog};
