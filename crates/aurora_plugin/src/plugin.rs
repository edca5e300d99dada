use std::sync::{Arc, LazyLock};

use aurora_rpc_client::{
    HttpTransport, HttpTransportConfig, MethodInvocation, RpcClientError, RpcTransport,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    context::{AttachError, RpcContext},
    dispatch::{self, BoundNamespace, CallError},
    namespaces::{
        BuiltinNamespaces, EthRpcMethods, NetRpcMethods, ParityRpcMethods, TxPoolRpcMethods,
        Web3RpcMethods,
    },
    registry::{Namespace, NamespaceRegistry},
    session::RpcPlugin,
};

static BUILTIN: LazyLock<BuiltinNamespaces> = LazyLock::new(|| {
    BuiltinNamespaces::new().expect("built-in namespaces have unique names and definitions")
});

/// Composition root of the Aurora namespaces.
///
/// Every namespace shares the plugin's transport. Calls made while no
/// transport is attached fail with [`CallError::NotInitialized`].
#[derive(Clone, Debug)]
pub struct AuroraPlugin {
    builtin: &'static BuiltinNamespaces,
    context: RpcContext,
}

impl AuroraPlugin {
    /// Creates a plugin without a transport.
    pub fn new() -> Self {
        Self {
            builtin: &BUILTIN,
            context: RpcContext::new(),
        }
    }

    /// Creates a plugin bound to the provided transport.
    pub fn with_transport(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            builtin: &BUILTIN,
            context: RpcContext::with_transport(transport),
        }
    }

    /// Creates a plugin bound to an HTTP transport for the provided URL.
    pub fn from_url(url: &str) -> Result<Self, RpcClientError> {
        let transport = HttpTransport::new(url, None)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Creates a plugin bound to an HTTP transport with the provided
    /// configuration.
    pub fn from_config(config: &HttpTransportConfig) -> Result<Self, RpcClientError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Attaches a transport to a detached plugin.
    pub fn attach(&mut self, transport: Arc<dyn RpcTransport>) -> Result<(), AttachError> {
        self.context.attach(transport)
    }

    /// Whether a transport is attached.
    pub fn is_attached(&self) -> bool {
        self.context.is_attached()
    }

    /// The shared transport context.
    pub fn context(&self) -> &RpcContext {
        &self.context
    }

    /// The registry of all namespaces.
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.builtin.registry
    }

    /// Returns the namespace with the provided name, bound to the plugin's
    /// transport.
    pub fn namespace(&self, name: &str) -> Option<BoundNamespace<'_>> {
        self.builtin
            .registry
            .get(name)
            .map(|namespace| self.bind(namespace))
    }

    /// The `web3` namespace.
    pub fn web3(&self) -> Web3RpcMethods<'_> {
        Web3RpcMethods::new(self.bind(&self.builtin.web3))
    }

    /// The `net` namespace.
    pub fn net(&self) -> NetRpcMethods<'_> {
        NetRpcMethods::new(self.bind(&self.builtin.net))
    }

    /// The `eth` namespace.
    pub fn eth(&self) -> EthRpcMethods<'_> {
        EthRpcMethods::new(self.bind(&self.builtin.eth))
    }

    /// The `parity` namespace.
    pub fn parity(&self) -> ParityRpcMethods<'_> {
        ParityRpcMethods::new(self.bind(&self.builtin.parity))
    }

    /// The `txpool` namespace.
    pub fn txpool(&self) -> TxPoolRpcMethods<'_> {
        TxPoolRpcMethods::new(self.bind(&self.builtin.txpool))
    }

    /// Calls an operation by namespace and local name.
    pub async fn request(
        &self,
        namespace: &str,
        local: &str,
        params: Vec<Value>,
    ) -> Result<Value, CallError> {
        let transport = self.transport(namespace)?;
        dispatch::call(
            transport.as_ref(),
            self.builtin.registry.resolve(namespace, local),
            params,
        )
        .await
    }

    /// Sends an arbitrary method through the plugin's transport, bypassing the
    /// namespace definitions.
    pub async fn send_json_rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, CallError> {
        let transport = self.transport(Self::PLUGIN_NAMESPACE)?;

        log::trace!("Sending raw {method} request");
        let value = transport
            .send(MethodInvocation::new(method, params))
            .await?;

        dispatch::decode_result(method, value)
    }

    fn bind<'a>(&'a self, namespace: &'a Namespace) -> BoundNamespace<'a> {
        BoundNamespace::new(namespace, &self.context)
    }

    fn transport(&self, namespace: &str) -> Result<&Arc<dyn RpcTransport>, CallError> {
        self.context
            .transport()
            .ok_or_else(|| CallError::NotInitialized {
                namespace: namespace.to_string(),
            })
    }
}

impl Default for AuroraPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcPlugin for AuroraPlugin {
    const PLUGIN_NAMESPACE: &'static str = "aurora";

    fn link(&mut self, parent: &RpcContext) -> Result<(), AttachError> {
        let transport = parent
            .transport()
            .ok_or(AttachError::NotInitialized)?
            .clone();

        if self.context.replace(transport).is_some() {
            log::warn!("Replacing the transport of the {} plugin", Self::PLUGIN_NAMESPACE);
        } else {
            log::debug!("Linked the {} plugin", Self::PLUGIN_NAMESPACE);
        }

        Ok(())
    }
}
