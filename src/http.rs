//! Native HTTP transport for the analysis service.
//!
//! DESIGN
//! ======
//! Thin `reqwest` wrapper implementing [`AnalysisApi`]. The request timeout
//! configured on the client bounds every call, so a hung service resolves
//! as a failed analysis instead of leaving the session busy forever.

use serde::Serialize;
use session::api::{
    ANALYZE_PATH, AnalysisApi, AnalysisReport, AnalysisRequestError, AnalyzeRequest, CatalogLoadError, PRODUCTS_PATH,
    RequestFailure, endpoint_url, parse_products, parse_report,
};
use session::catalog::Product;

use crate::config::ClientConfig;

#[derive(Debug, thiserror::Error)]
#[error("HTTP client build failed: {0}")]
pub struct HttpClientBuildError(String);

pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout_secs: u64,
}

impl HttpAnalysisClient {
    /// Build a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientBuildError`] if the TLS backend cannot initialize.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpClientBuildError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| HttpClientBuildError(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), request_timeout_secs: config.timeouts.request_secs })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, path: &str) -> Result<String, RequestFailure> {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;
        self.read_body(response).await
    }

    async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<String, RequestFailure> {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;
        self.read_body(response).await
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, RequestFailure> {
        let status = response.status();
        if !status.is_success() {
            return Err(RequestFailure::Status { status: status.as_u16() });
        }
        response
            .text()
            .await
            .map_err(|e| self.transport_failure(&e))
    }

    fn transport_failure(&self, e: &reqwest::Error) -> RequestFailure {
        if e.is_timeout() {
            RequestFailure::TimedOut { secs: self.request_timeout_secs }
        } else {
            RequestFailure::Network(e.to_string())
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AnalysisApi for HttpAnalysisClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError> {
        let body = self.get_text(PRODUCTS_PATH).await?;
        Ok(parse_products(&body)?)
    }

    async fn analyze_product(&self, product_name: &str) -> Result<AnalysisReport, AnalysisRequestError> {
        let body = self
            .post_json(ANALYZE_PATH, &AnalyzeRequest::new(product_name))
            .await?;
        Ok(parse_report(&body)?)
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
