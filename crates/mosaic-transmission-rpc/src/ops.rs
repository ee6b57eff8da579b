//! Internal trait abstracting the HTTP exchange with the daemon.
//!
//! This module provides the [`HttpExchange`] trait which abstracts the underlying
//! HTTP client, enabling mocking in tests.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use url::Url;

use crate::RpcError;

/// A fully prepared POST to the RPC endpoint.
#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

/// Status, headers and the fully drained body of a reply.
#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

/// Internal trait that abstracts a single HTTP request/response exchange.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait HttpExchange {
    async fn post(&self, request: &HttpRequest) -> Result<HttpResponse, RpcError>;
}

/// [`reqwest`] backed exchange. Idle connections are not kept, so every attempt
/// opens and drains its own connection.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: reqwest::Client,
}

impl ReqwestExchange {
    /// Builds the underlying HTTP client, applying `timeout` to every exchange when set.
    pub fn try_new(timeout: Option<Duration>) -> Result<Self, RpcError> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl HttpExchange for ReqwestExchange {
    async fn post(&self, request: &HttpRequest) -> Result<HttpResponse, RpcError> {
        let response = self
            .client
            .post(request.url.clone())
            .headers(request.headers.clone())
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
