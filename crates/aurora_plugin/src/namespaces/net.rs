use std::ops::Deref;

use crate::{
    dispatch::{BoundNamespace, CallError},
    registry::{Namespace, RegistryError},
};

pub(super) fn namespace() -> Result<Namespace, RegistryError> {
    // Aurora's `net` is the generic namespace, unmodified.
    super::base::net()
}

/// Typed `net` operations.
#[derive(Clone, Copy, Debug)]
pub struct NetRpcMethods<'a>(BoundNamespace<'a>);

impl<'a> NetRpcMethods<'a> {
    pub(crate) fn new(bound: BoundNamespace<'a>) -> Self {
        Self(bound)
    }

    /// Returns the network ID as a decimal string.
    pub async fn get_id(&self) -> Result<String, CallError> {
        self.request_as("get_id", vec![]).await
    }

    /// Returns the number of connected peers as a hex quantity.
    pub async fn get_peer_count(&self) -> Result<String, CallError> {
        self.request_as("get_peer_count", vec![]).await
    }

    /// Returns whether the node listens for network connections.
    pub async fn is_listening(&self) -> Result<bool, CallError> {
        self.request_as("is_listening", vec![]).await
    }
}

impl<'a> Deref for NetRpcMethods<'a> {
    type Target = BoundNamespace<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
