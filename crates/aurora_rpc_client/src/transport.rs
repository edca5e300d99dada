use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::RpcClientError;

/// A JSON-RPC method name together with its positional parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MethodInvocation {
    /// The wire method name, e.g. `net_version`.
    pub method: String,
    /// The positional parameters, in order.
    pub params: Vec<serde_json::Value>,
}

impl MethodInvocation {
    /// Constructs a new instance.
    pub fn new(method: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// A shared mechanism for delivering a single JSON-RPC request and returning
/// the node's result.
///
/// Implementations own connection management and request id correlation.
/// Callers share one transport between many namespaces, so `send` takes
/// `&self` and must be safe to call concurrently.
#[async_trait]
pub trait RpcTransport: Debug + Send + Sync {
    /// Sends the invocation and returns the untransformed `result` value.
    ///
    /// JSON-RPC error objects returned by the node are reported as
    /// [`RpcClientError::JsonRpcError`].
    async fn send(&self, invocation: MethodInvocation) -> Result<serde_json::Value, RpcClientError>;
}

#[async_trait]
impl<TransportT: RpcTransport + ?Sized> RpcTransport for Arc<TransportT> {
    async fn send(&self, invocation: MethodInvocation) -> Result<serde_json::Value, RpcClientError> {
        self.as_ref().send(invocation).await
    }
}
