//! Turns resolved call definitions into transport requests.

use aurora_rpc_client::{MethodInvocation, RpcClientError, RpcTransport};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    context::RpcContext,
    registry::{Namespace, NotAvailable, ParamError, Resolution, Unavailability},
};

/// Errors that occur while calling a remote operation.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The operation is suppressed, undefined, or in an unknown namespace.
    /// Nothing was sent.
    #[error("The method '{namespace}.{method}' is not supported: {reason}")]
    MethodNotSupported {
        /// The namespace
        namespace: String,
        /// The local name
        method: String,
        /// Why the operation cannot be called
        reason: Unavailability,
    },
    /// The arguments violate the operation's parameter contract. Nothing was
    /// sent.
    #[error("Invalid arguments for '{method}': {reason}")]
    InvalidArguments {
        /// The wire method, or the local name if a typed argument failed to
        /// serialize
        method: String,
        /// The violation
        reason: ParamError,
    },
    /// No transport is attached.
    #[error("The '{namespace}' namespace is not attached to a transport")]
    NotInitialized {
        /// The namespace
        namespace: String,
    },
    /// The transport failed to deliver the request or the node returned an
    /// error.
    #[error(transparent)]
    Transport(#[from] RpcClientError),
    /// The result could not be decoded into the requested type.
    #[error(
        "Result of '{method}' failed to decode with expected type '{expected_type}', due to error: '{error}'"
    )]
    InvalidResult {
        /// The wire method
        method: String,
        /// The requested type
        expected_type: &'static str,
        /// The decoding error
        error: serde_json::Error,
    },
}

impl From<NotAvailable> for CallError {
    fn from(value: NotAvailable) -> Self {
        let NotAvailable {
            namespace,
            method,
            reason,
        } = value;

        CallError::MethodNotSupported {
            namespace,
            method,
            reason,
        }
    }
}

/// Sends the resolved operation through the transport.
///
/// Unavailable operations and arguments that violate the parameter contract
/// fail without touching the transport. Otherwise exactly one request is
/// sent and its result is returned unmodified.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
pub async fn call(
    transport: &dyn RpcTransport,
    resolution: Resolution<'_>,
    params: Vec<Value>,
) -> Result<Value, CallError> {
    let definition = match resolution {
        Resolution::Available(definition) => definition,
        Resolution::NotAvailable(not_available) => return Err(not_available.into()),
    };

    definition
        .params()
        .validate(&params)
        .map_err(|reason| CallError::InvalidArguments {
            method: definition.method().to_string(),
            reason,
        })?;

    log::trace!("Dispatching {} with {} params", definition.method(), params.len());

    let result = transport
        .send(MethodInvocation::new(definition.method(), params))
        .await?;

    Ok(result)
}

/// Decodes a raw result into the requested type.
pub(crate) fn decode_result<T: DeserializeOwned>(
    method: &str,
    value: Value,
) -> Result<T, CallError> {
    serde_json::from_value(value).map_err(|error| CallError::InvalidResult {
        method: method.to_string(),
        expected_type: std::any::type_name::<T>(),
        error,
    })
}

/// Converts a typed argument into a positional JSON parameter.
pub(crate) fn to_param<T: Serialize + ?Sized>(local: &str, value: &T) -> Result<Value, CallError> {
    serde_json::to_value(value).map_err(|error| CallError::InvalidArguments {
        method: local.to_string(),
        reason: ParamError::Unserializable(error),
    })
}

/// A namespace bound to the transport of its composition root.
#[derive(Clone, Copy, Debug)]
pub struct BoundNamespace<'a> {
    namespace: &'a Namespace,
    context: &'a RpcContext,
}

impl<'a> BoundNamespace<'a> {
    /// Binds a namespace to a context.
    pub fn new(namespace: &'a Namespace, context: &'a RpcContext) -> Self {
        Self { namespace, context }
    }

    /// The underlying namespace.
    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    /// The namespace's name.
    pub fn name(&self) -> &'a str {
        self.namespace.name()
    }

    /// Looks up a local name.
    pub fn resolve(&self, local: &str) -> Resolution<'a> {
        self.namespace.resolve(local)
    }

    /// Calls the operation with the provided local name and positional
    /// parameters, returning the raw result.
    pub async fn request(&self, local: &str, params: Vec<Value>) -> Result<Value, CallError> {
        let transport = self
            .context
            .transport()
            .ok_or_else(|| CallError::NotInitialized {
                namespace: self.namespace.name().to_string(),
            })?;

        call(transport.as_ref(), self.resolve(local), params).await
    }

    /// Calls the operation and decodes its result into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        local: &str,
        params: Vec<Value>,
    ) -> Result<T, CallError> {
        let value = self.request(local, params).await?;

        let method = match self.resolve(local) {
            Resolution::Available(definition) => definition.method(),
            Resolution::NotAvailable(_) => local,
        };
        decode_result(method, value)
    }
}
