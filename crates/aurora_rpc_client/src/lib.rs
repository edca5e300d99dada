#![warn(missing_docs)]

//! JSON-RPC 2.0 transport for Aurora nodes
//!
//! Provides the [`RpcTransport`] abstraction that namespaces dispatch through
//! and an HTTP(S) implementation of it.

mod client;
mod config;
mod reqwest_error;
mod transport;

/// Types specific to JSON-RPC
pub mod jsonrpc;

pub use reqwest::header::{self, HeaderMap};

pub use self::{
    client::{HttpTransport, RpcClientError},
    config::{AuroraNetwork, HttpTransportConfig},
    reqwest_error::{MiddlewareError, ReqwestError},
    transport::{MethodInvocation, RpcTransport},
};
