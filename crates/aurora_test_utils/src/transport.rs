use std::collections::HashMap;

use async_trait::async_trait;
use aurora_rpc_client::{MethodInvocation, RpcClientError, RpcTransport, jsonrpc};
use parking_lot::Mutex;

/// JSON-RPC error code for a method that the node does not know.
const METHOD_NOT_FOUND: i64 = -32601;

/// A canned reply of a [`StubTransport`].
#[derive(Clone, Debug)]
pub enum StubResponse {
    /// Reply with a `result` value.
    Result(serde_json::Value),
    /// Reply with a JSON-RPC error object.
    Error(jsonrpc::Error),
}

/// An in-memory [`RpcTransport`] that replies with canned responses per wire
/// method and records every invocation it receives.
///
/// Methods without a canned response fail with a "method not found" JSON-RPC
/// error.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, StubResponse>>,
    invocations: Mutex<Vec<MethodInvocation>>,
}

impl StubTransport {
    /// Creates a stub without canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies to `method` with the provided result.
    pub fn with_result(self, method: &str, result: serde_json::Value) -> Self {
        self.responses
            .lock()
            .insert(method.to_string(), StubResponse::Result(result));
        self
    }

    /// Replies to `method` with a JSON-RPC error object.
    pub fn with_error(self, method: &str, code: i64, message: &str) -> Self {
        self.responses.lock().insert(
            method.to_string(),
            StubResponse::Error(jsonrpc::Error {
                code,
                message: message.to_string(),
                data: None,
            }),
        );
        self
    }

    /// Returns all invocations received so far, in arrival order.
    pub fn invocations(&self) -> Vec<MethodInvocation> {
        self.invocations.lock().clone()
    }

    /// Returns the number of invocations received so far.
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().len()
    }
}

#[async_trait]
impl RpcTransport for StubTransport {
    async fn send(&self, invocation: MethodInvocation) -> Result<serde_json::Value, RpcClientError> {
        let response = self.responses.lock().get(&invocation.method).cloned();
        let request =
            serde_json::to_string(&invocation).map_err(RpcClientError::InvalidJsonRequest)?;
        let method = invocation.method.clone();

        self.invocations.lock().push(invocation);

        match response {
            Some(StubResponse::Result(result)) => Ok(result),
            Some(StubResponse::Error(error)) => Err(RpcClientError::JsonRpcError { error, request }),
            None => Err(RpcClientError::JsonRpcError {
                error: jsonrpc::Error {
                    code: METHOD_NOT_FOUND,
                    message: format!("the method {method} does not exist/is not available"),
                    data: None,
                },
                request,
            }),
        }
    }
}
