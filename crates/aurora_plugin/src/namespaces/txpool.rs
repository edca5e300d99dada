use std::ops::Deref;

use serde_json::Value;

use crate::{
    dispatch::{BoundNamespace, CallError},
    registry::{Namespace, ParamSpec, RegistryError},
};

pub(super) fn namespace() -> Result<Namespace, RegistryError> {
    let mut txpool = Namespace::new(super::TXPOOL);
    txpool.define("status", "txpool_status", ParamSpec::none())?;
    txpool.define("inspect", "txpool_inspect", ParamSpec::none())?;
    txpool.define("content", "txpool_content", ParamSpec::none())?;

    Ok(txpool)
}

/// Typed `txpool` operations.
#[derive(Clone, Copy, Debug)]
pub struct TxPoolRpcMethods<'a>(BoundNamespace<'a>);

impl<'a> TxPoolRpcMethods<'a> {
    pub(crate) fn new(bound: BoundNamespace<'a>) -> Self {
        Self(bound)
    }

    /// Returns the number of pending and queued transactions.
    pub async fn status(&self) -> Result<Value, CallError> {
        self.request("status", vec![]).await
    }

    /// Returns a textual summary of the pending and queued transactions.
    pub async fn inspect(&self) -> Result<Value, CallError> {
        self.request("inspect", vec![]).await
    }

    /// Returns the pending and queued transactions.
    pub async fn content(&self) -> Result<Value, CallError> {
        self.request("content", vec![]).await
    }
}

impl<'a> Deref for TxPoolRpcMethods<'a> {
    type Target = BoundNamespace<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
