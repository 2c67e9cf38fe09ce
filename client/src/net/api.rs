//! Browser transport for the analysis service.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, bounded by a
//! `gloo-timers` timeout.
//! Native builds: stubs returning a network failure, since these endpoints
//! are only reachable from the page.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is reported as a `RequestFailure` so the session can turn
//! it into an error-shaped bot entry instead of breaking the page.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::api::{
    ANALYZE_PATH, AnalysisApi, AnalysisReport, AnalysisRequestError, CatalogLoadError, DEFAULT_API_BASE_URL,
    PRODUCTS_PATH, RequestFailure, endpoint_url,
};
use session::catalog::Product;

/// Service base URL baked in at build time via `ALLERPREDICT_API_URL`.
pub const API_BASE_URL: &str = match option_env!("ALLERPREDICT_API_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `gloo-net` implementation of [`AnalysisApi`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserAnalysisClient {
    base_url: &'static str,
    timeout_secs: u64,
}

impl BrowserAnalysisClient {
    #[must_use]
    pub const fn new(base_url: &'static str, timeout_secs: u64) -> Self {
        Self { base_url, timeout_secs }
    }

    #[must_use]
    pub const fn from_build_env() -> Self {
        Self::new(API_BASE_URL, REQUEST_TIMEOUT_SECS)
    }

    #[must_use]
    pub fn products_url(&self) -> String {
        endpoint_url(self.base_url, PRODUCTS_PATH)
    }

    #[must_use]
    pub fn analyze_url(&self) -> String {
        endpoint_url(self.base_url, ANALYZE_PATH)
    }

    /// Timeout in milliseconds, saturated to what browser timers accept.
    #[must_use]
    pub fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout_secs.saturating_mul(1000)).unwrap_or(u32::MAX)
    }

    #[cfg(feature = "csr")]
    async fn with_timeout<T>(
        &self,
        request: impl std::future::Future<Output = Result<T, RequestFailure>>,
    ) -> Result<T, RequestFailure> {
        use futures::future::{Either, select};

        let timeout = gloo_timers::future::TimeoutFuture::new(self.timeout_millis());
        futures::pin_mut!(request);
        futures::pin_mut!(timeout);
        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(RequestFailure::TimedOut { secs: self.timeout_secs }),
        }
    }
}

#[cfg(feature = "csr")]
async fn read_body(resp: gloo_net::http::Response) -> Result<String, RequestFailure> {
    if !resp.ok() {
        return Err(RequestFailure::Status { status: resp.status() });
    }
    resp.text()
        .await
        .map_err(|e| RequestFailure::Network(e.to_string()))
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> RequestFailure {
    RequestFailure::Network("HTTP is only available in the browser".to_owned())
}

#[async_trait::async_trait(?Send)]
impl AnalysisApi for BrowserAnalysisClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError> {
        #[cfg(feature = "csr")]
        {
            let url = self.products_url();
            let body = self
                .with_timeout(async {
                    let resp = gloo_net::http::Request::get(&url)
                        .send()
                        .await
                        .map_err(|e| RequestFailure::Network(e.to_string()))?;
                    read_body(resp).await
                })
                .await?;
            Ok(session::api::parse_products(&body)?)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(unavailable().into())
        }
    }

    async fn analyze_product(&self, product_name: &str) -> Result<AnalysisReport, AnalysisRequestError> {
        #[cfg(feature = "csr")]
        {
            let url = self.analyze_url();
            let request = session::api::AnalyzeRequest::new(product_name);
            let body = self
                .with_timeout(async {
                    let resp = gloo_net::http::Request::post(&url)
                        .json(&request)
                        .map_err(|e| RequestFailure::Network(e.to_string()))?
                        .send()
                        .await
                        .map_err(|e| RequestFailure::Network(e.to_string()))?;
                    read_body(resp).await
                })
                .await?;
            Ok(session::api::parse_report(&body)?)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = product_name;
            Err(unavailable().into())
        }
    }
}
