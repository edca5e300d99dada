//! The namespaces served by Aurora nodes.

mod base;
mod eth;
mod net;
mod parity;
mod txpool;
mod web3;

pub use self::{
    eth::EthRpcMethods,
    net::NetRpcMethods,
    parity::{
        EqualityFilter, ParityRpcMethods, PendingTransactionsFilter, PendingTransactionsParams,
        ToAction, ToFilter, ValueFilter,
    },
    txpool::TxPoolRpcMethods,
    web3::Web3RpcMethods,
};
use crate::registry::{Namespace, NamespaceRegistry, RegistryError};

/// Name of the `web3` namespace.
pub const WEB3: &str = "web3";
/// Name of the `net` namespace.
pub const NET: &str = "net";
/// Name of the `eth` namespace.
pub const ETH: &str = "eth";
/// Name of the `parity` namespace.
pub const PARITY: &str = "parity";
/// Name of the `txpool` namespace.
pub const TXPOOL: &str = "txpool";

/// The built-in namespaces, both individually and as a registry.
#[derive(Clone, Debug)]
pub(crate) struct BuiltinNamespaces {
    pub web3: Namespace,
    pub net: Namespace,
    pub eth: Namespace,
    pub parity: Namespace,
    pub txpool: Namespace,
    pub registry: NamespaceRegistry,
}

impl BuiltinNamespaces {
    pub fn new() -> Result<Self, RegistryError> {
        let web3 = web3::namespace()?;
        let net = net::namespace()?;
        let eth = eth::namespace()?;
        let parity = parity::namespace()?;
        let txpool = txpool::namespace()?;

        let mut registry = NamespaceRegistry::new();
        for namespace in [&web3, &net, &eth, &parity, &txpool] {
            registry.insert(namespace.clone())?;
        }

        Ok(Self {
            web3,
            net,
            eth,
            parity,
            txpool,
            registry,
        })
    }
}
