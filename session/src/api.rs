//! Analysis service contract: wire types, errors, and the transport trait.
//!
//! DESIGN
//! ======
//! The remote service is an opaque collaborator with two endpoints:
//! `GET /products` and `POST /analyze_product`. Both front ends speak to it
//! through [`AnalysisApi`], so the controller can be driven by `reqwest`
//! natively, `gloo-net` in the browser, or a mock in tests.
//!
//! ERROR HANDLING
//! ==============
//! Every transport failure is reduced to a [`RequestFailure`]. Catalog and
//! analysis calls wrap it in distinct error types because the controller
//! treats them differently: catalog failures degrade silently, analysis
//! failures become a visible bot entry.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

/// Base URL used when no configuration overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Catalog listing endpoint.
pub const PRODUCTS_PATH: &str = "/products";
/// Single-product analysis endpoint.
pub const ANALYZE_PATH: &str = "/analyze_product";

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Request body for `POST /analyze_product`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub product_name: String,
}

impl AnalyzeRequest {
    #[must_use]
    pub fn new(product_name: impl Into<String>) -> Self {
        Self { product_name: product_name.into() }
    }
}

/// Analysis report returned by the service.
///
/// `risk_level` and `ethical_score` are required; missing list fields decode
/// as empty so every report renders the same way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub detected_allergens: Vec<String>,
    pub risk_level: String,
    pub ethical_score: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Risk level used for reports synthesized from a failed request.
    pub const ERROR_RISK_LEVEL: &'static str = "Error";

    /// Build the uniform error-shaped report shown when a request fails.
    #[must_use]
    pub fn from_failure(message: impl Into<String>) -> Self {
        Self {
            detected_allergens: Vec::new(),
            risk_level: Self::ERROR_RISK_LEVEL.to_owned(),
            ethical_score: 0.0,
            recommendations: vec![message.into()],
        }
    }

    /// Whether this report was synthesized from a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.risk_level == Self::ERROR_RISK_LEVEL
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Transport-level reason a request did not produce a usable payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestFailure {
    /// The request never produced a response (connection refused, DNS, etc.).
    #[error("{0}")]
    Network(String),

    /// The service answered with a non-success HTTP status.
    #[error("network response was not ok (status {status})")]
    Status { status: u16 },

    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Parse(String),

    /// The transport gave up waiting for a response.
    #[error("request timed out after {secs}s")]
    TimedOut { secs: u64 },

    /// The in-flight request was abandoned before it resolved.
    #[error("request was cancelled")]
    Cancelled,
}

/// Fetching the product catalog failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("catalog load failed: {0}")]
pub struct CatalogLoadError(#[from] pub RequestFailure);

/// An analysis request failed. Its message is what the user sees.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct AnalysisRequestError(#[from] pub RequestFailure);

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Transport for the analysis service. Enables mocking in tests.
///
/// Futures are not required to be `Send`: the browser transport holds
/// JS handles across its await points.
#[async_trait::async_trait(?Send)]
pub trait AnalysisApi {
    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError`] on any transport or decode failure.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError>;

    /// Analyze a single product by name.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisRequestError`] on network failure, non-success
    /// status, timeout, or a malformed body.
    async fn analyze_product(&self, product_name: &str) -> Result<AnalysisReport, AnalysisRequestError>;
}

/// Join a base URL and an endpoint path, tolerating a trailing slash.
#[must_use]
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Decode an analysis response body.
///
/// # Errors
///
/// Returns [`RequestFailure::Parse`] when the body is not a valid report.
pub fn parse_report(body: &str) -> Result<AnalysisReport, RequestFailure> {
    serde_json::from_str(body).map_err(|e| RequestFailure::Parse(e.to_string()))
}

/// Decode a catalog response body.
///
/// # Errors
///
/// Returns [`RequestFailure::Parse`] when the body is not a product array.
pub fn parse_products(body: &str) -> Result<Vec<Product>, RequestFailure> {
    serde_json::from_str(body).map_err(|e| RequestFailure::Parse(e.to_string()))
}
