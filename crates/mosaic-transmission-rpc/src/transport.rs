//! Sends encoded requests to the daemon and runs the session-id negotiation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::resolve_endpoint;
use crate::ops::{HttpExchange, HttpRequest};
use crate::request::RpcRequest;
use crate::response::RpcResponse;
use crate::session::{SESSION_ID_HEADER, SessionNegotiator};
use crate::RpcError;

const JSON: &str = "application/json";

/// Owns the resolved endpoint, the credentials and the session id of one client.
pub(crate) struct Transport<T> {
    endpoint: Url,
    exchange: T,
    session: SessionNegotiator,
    authorization: Option<HeaderValue>,
    max_session_retries: u32,
}

impl<T: HttpExchange> Transport<T> {
    pub(crate) fn new(config: &ClientConfig, exchange: T) -> Result<Self, RpcError> {
        let endpoint = resolve_endpoint(&config.host)?;
        let authorization = if config.username.is_empty() {
            None
        } else {
            let credentials = STANDARD.encode(format!("{}:{}", config.username, config.password));
            let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
                .map_err(|e| RpcError::InvalidEndpoint(format!("unusable credentials: {e}")))?;
            value.set_sensitive(true);
            Some(value)
        };

        Ok(Self {
            endpoint,
            exchange,
            session: SessionNegotiator::new(),
            authorization,
            max_session_retries: config.max_session_retries,
        })
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.session.is_initialized()
    }

    /// Posts `request`, re-sending it with the fresh session id after every 409 until
    /// the retry budget is spent.
    #[instrument(skip(self, request), fields(action = %request.method))]
    pub(crate) async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        let body = request.to_json()?;
        let attempts = self.max_session_retries.saturating_add(1);

        for attempt in 1..=attempts {
            let http_request = HttpRequest {
                url: self.endpoint.clone(),
                headers: self.headers()?,
                body: body.clone(),
            };
            debug!(attempt, "Posting request");
            let response = self.exchange.post(&http_request).await?;

            match response.status {
                StatusCode::CONFLICT => {
                    debug!(attempt, "Session id rejected");
                    self.session.refresh(&response.headers);
                }
                StatusCode::UNAUTHORIZED => return Err(RpcError::Unauthorized),
                status => {
                    if !status.is_success() {
                        debug!(%status, "Decoding non-success reply");
                    }
                    let response = RpcResponse::from_json(&response.body)?;
                    debug!(result = %response.result, "Received response");
                    return Ok(response);
                }
            }
        }

        warn!(attempts, "Giving up on session negotiation");
        Err(RpcError::SessionConflict { attempts })
    }

    fn headers(&self) -> Result<HeaderMap, RpcError> {
        let mut headers = HeaderMap::new();
        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }
        let token = HeaderValue::from_str(&self.session.token())
            .map_err(|e| RpcError::Transport(format!("unusable session id: {e}")))?;
        headers.insert(SESSION_ID_HEADER, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        Ok(headers)
    }
}
