use std::sync::Arc;

use aurora_rpc_client::RpcTransport;

/// Errors that occur while attaching a transport or linking a plugin.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    /// A transport is already attached.
    #[error("A transport is already attached")]
    AlreadyAttached,
    /// The parent has no transport to link to.
    #[error("The parent session has no transport attached")]
    NotInitialized,
    /// Another plugin is registered under the same namespace.
    #[error("A plugin is already registered under the '{namespace}' namespace")]
    DuplicatePlugin {
        /// The plugin namespace
        namespace: String,
    },
}

/// The transport shared by every namespace of a composition root.
///
/// A context starts detached unless it is created with a transport.
#[derive(Clone, Debug, Default)]
pub struct RpcContext {
    transport: Option<Arc<dyn RpcTransport>>,
}

impl RpcContext {
    /// Creates a detached context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context attached to the provided transport.
    pub fn with_transport(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Attaches a transport to a detached context.
    pub fn attach(&mut self, transport: Arc<dyn RpcTransport>) -> Result<(), AttachError> {
        if self.transport.is_some() {
            return Err(AttachError::AlreadyAttached);
        }

        log::debug!("Attaching transport: {transport:?}");
        self.transport = Some(transport);
        Ok(())
    }

    /// Replaces the transport, returning the previous one.
    pub(crate) fn replace(
        &mut self,
        transport: Arc<dyn RpcTransport>,
    ) -> Option<Arc<dyn RpcTransport>> {
        self.transport.replace(transport)
    }

    /// The attached transport, if any.
    pub fn transport(&self) -> Option<&Arc<dyn RpcTransport>> {
        self.transport.as_ref()
    }

    /// Whether a transport is attached.
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }
}
