#![warn(missing_docs)]

//! Aurora JSON-RPC namespaces.
//!
//! Groups the remote operations served by Aurora nodes under the `web3`,
//! `net`, `eth`, `parity` and `txpool` namespaces and binds them to one
//! shared [`RpcTransport`](aurora_rpc_client::RpcTransport). Operations of
//! the generic Ethereum namespaces that Aurora does not serve are suppressed
//! and fail without network traffic.

mod context;
pub mod dispatch;
pub mod namespaces;
mod plugin;
pub mod registry;
mod session;

pub use self::{
    context::{AttachError, RpcContext},
    dispatch::{BoundNamespace, CallError},
    plugin::AuroraPlugin,
    registry::{
        Namespace, NamespaceRegistry, ParamKind, ParamSpec, RegistryError, Resolution,
        RpcCallDefinition, Unavailability,
    },
    session::{RpcPlugin, RpcSession, RpcSessionExt},
};
