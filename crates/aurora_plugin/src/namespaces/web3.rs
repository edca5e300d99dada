use std::ops::Deref;

use crate::{
    dispatch::{BoundNamespace, CallError},
    registry::{Namespace, ParamKind, ParamSpec, RegistryError},
};

pub(super) fn namespace() -> Result<Namespace, RegistryError> {
    let mut web3 = Namespace::new(super::WEB3);
    web3.define("client_version", "web3_clientVersion", ParamSpec::none())?;
    web3.define("sha3", "web3_sha3", ParamSpec::required([ParamKind::Data]))?;

    Ok(web3)
}

/// Typed `web3` operations.
#[derive(Clone, Copy, Debug)]
pub struct Web3RpcMethods<'a>(BoundNamespace<'a>);

impl<'a> Web3RpcMethods<'a> {
    pub(crate) fn new(bound: BoundNamespace<'a>) -> Self {
        Self(bound)
    }

    /// Returns the node's client version string.
    pub async fn client_version(&self) -> Result<String, CallError> {
        self.request_as("client_version", vec![]).await
    }

    /// Returns the Keccak-256 hash of the provided `0x`-prefixed hex data, as
    /// computed by the node.
    ///
    /// The data is sent verbatim. Anything that is not even-length hex fails
    /// with [`CallError::InvalidArguments`] before reaching the transport.
    pub async fn sha3(&self, data: &str) -> Result<String, CallError> {
        self.request_as("sha3", vec![data.into()]).await
    }
}

impl<'a> Deref for Web3RpcMethods<'a> {
    type Target = BoundNamespace<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
