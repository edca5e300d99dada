use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::{
    Client as HttpClient,
    header::{self, HeaderMap, HeaderValue},
};
use reqwest_middleware::{ClientBuilder as HttpClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
#[cfg(feature = "tracing")]
use reqwest_tracing::TracingMiddleware;
use serde::{Deserialize, Serialize};

use crate::{
    HttpTransportConfig, MethodInvocation, MiddlewareError, ReqwestError, RpcTransport, jsonrpc,
};

const EXPONENT_BASE: u32 = 2;
const USER_AGENT: &str = concat!("aurora_rpc_client/", env!("CARGO_PKG_VERSION"));

/// Specialized error types
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    /// The HTTP client could not be constructed.
    #[error("Failed to construct the HTTP client: {0}")]
    ClientBuild(ReqwestError),

    /// The message could not be sent to the remote node
    #[error(transparent)]
    FailedToSend(MiddlewareError),

    /// The remote node failed to reply with the body of the response
    #[error("The response text was corrupted: {0}.")]
    CorruptedResponse(ReqwestError),

    /// The server returned an error code.
    #[error("The Http server returned error status code: {0}")]
    HttpStatus(ReqwestError),

    /// A configured HTTP header is not a valid header name or value.
    #[error("Invalid HTTP header '{name}': {message}")]
    InvalidHeader {
        /// The header name
        name: String,
        /// Why the header was rejected
        message: String,
    },

    /// The request cannot be serialized as JSON.
    #[error(transparent)]
    InvalidJsonRequest(serde_json::Error),

    /// The server returned an invalid JSON-RPC response.
    #[error(
        "Response '{response}' failed to parse with expected type '{expected_type}', due to error: '{error}'"
    )]
    InvalidResponse {
        /// The response text
        response: String,
        /// The expected type of the response
        expected_type: &'static str,
        /// The parse error
        error: serde_json::Error,
    },

    /// The server returned an invalid JSON-RPC id.
    #[error("The server returned an invalid id: '{id:?}' in response: '{response}'")]
    InvalidId {
        /// The response text
        response: String,
        /// The invalid id
        id: jsonrpc::Id,
    },

    /// The lower retry bound exceeds the upper one.
    #[error("Minimum retry interval {min:?} exceeds the maximum retry interval {max:?}")]
    InvalidRetryBounds {
        /// The configured minimum retry interval
        min: Duration,
        /// The configured maximum retry interval
        max: Duration,
    },

    /// Invalid URL format
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// The JSON-RPC returned an error.
    #[error("{error}. Request: {request}")]
    JsonRpcError {
        /// The JSON-RPC error
        error: jsonrpc::Error,
        /// The request JSON
        request: String,
    },
}

/// A transport that sends JSON-RPC 2.0 requests to a remote node over HTTP(S).
///
/// Transient HTTP failures (connection errors, `429` and `5xx` statuses) are
/// retried with exponential backoff according to the [`HttpTransportConfig`].
/// Responses are never cached.
#[derive(Debug)]
pub struct HttpTransport {
    url: url::Url,
    client: ClientWithMiddleware,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Creates a new instance with the default retry policy, given a remote
    /// node URL.
    pub fn new(url: &str, extra_headers: Option<HeaderMap>) -> Result<Self, RpcClientError> {
        let config = HttpTransportConfig::new(url);
        Self::with_headers(&config, extra_headers.unwrap_or_default())
    }

    /// Creates a new instance from the provided configuration.
    pub fn from_config(config: &HttpTransportConfig) -> Result<Self, RpcClientError> {
        let headers = config.header_map()?;
        Self::with_headers(config, headers)
    }

    fn with_headers(
        config: &HttpTransportConfig,
        mut headers: HeaderMap,
    ) -> Result<Self, RpcClientError> {
        let url = config.url.parse()?;

        if config.min_retry_interval > config.max_retry_interval {
            return Err(RpcClientError::InvalidRetryBounds {
                min: config.min_retry_interval,
                max: config.max_retry_interval,
            });
        }

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.min_retry_interval, config.max_retry_interval)
            .base(EXPONENT_BASE)
            .build_with_max_retries(config.max_retries);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| RpcClientError::ClientBuild(error.into()))?;

        #[cfg(feature = "tracing")]
        let client = HttpClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        #[cfg(not(feature = "tracing"))]
        let client = HttpClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            url,
            client,
            next_id: AtomicU64::new(0),
        })
    }

    /// The URL of the remote node.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    fn parse_response_str(
        response: &str,
    ) -> Result<jsonrpc::Response<serde_json::Value>, RpcClientError> {
        serde_json::from_str(response).map_err(|error| RpcClientError::InvalidResponse {
            response: response.to_string(),
            expected_type: std::any::type_name::<jsonrpc::Response<serde_json::Value>>(),
            error,
        })
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    async fn send_request_body(
        &self,
        request_body: &SerializedRequest,
    ) -> Result<String, RpcClientError> {
        self.client
            .post(self.url.clone())
            .body(request_body.to_json_string())
            .send()
            .await
            .map_err(|err| RpcClientError::FailedToSend(err.into()))?
            .error_for_status()
            .map_err(|err| RpcClientError::HttpStatus(err.into()))?
            .text()
            .await
            .map_err(|err| RpcClientError::CorruptedResponse(err.into()))
    }

    fn serialize_request(
        &self,
        invocation: MethodInvocation,
    ) -> Result<(jsonrpc::Id, SerializedRequest), RpcClientError> {
        let id = jsonrpc::Id::Num(self.next_id.fetch_add(1, Ordering::Relaxed));
        let request = serde_json::to_value(jsonrpc::Request {
            version: jsonrpc::Version::V2_0,
            method: invocation,
            id: id.clone(),
        })
        .map_err(RpcClientError::InvalidJsonRequest)?;

        Ok((id, SerializedRequest(request)))
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    async fn send(&self, invocation: MethodInvocation) -> Result<serde_json::Value, RpcClientError> {
        let (id, request) = self.serialize_request(invocation)?;
        log::trace!("Sending JSON-RPC request: {}", request.to_json_string());

        let response_text = self.send_request_body(&request).await?;
        let response = Self::parse_response_str(&response_text)?;

        if response.id != id {
            return Err(RpcClientError::InvalidId {
                response: response_text,
                id: response.id,
            });
        }

        response
            .data
            .into_result()
            .map_err(|error| RpcClientError::JsonRpcError {
                error,
                request: request.to_json_string(),
            })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
struct SerializedRequest(serde_json::Value);

impl SerializedRequest {
    fn to_json_string(&self) -> String {
        self.0.to_string()
    }
}
