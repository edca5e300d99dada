use std::ops::Deref;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    dispatch::{BoundNamespace, CallError, to_param},
    registry::{Namespace, ParamKind, ParamSpec, RegistryError},
};

pub(super) fn namespace() -> Result<Namespace, RegistryError> {
    let mut parity = Namespace::new(super::PARITY);
    parity.define(
        "pending_transactions",
        "parity_pendingTransactions",
        ParamSpec::required([ParamKind::NullableObject]),
    )?;

    Ok(parity)
}

/// Parameters of `parity_pendingTransactions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PendingTransactionsParams {
    /// Maximum number of transactions to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Only return transactions that match the filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PendingTransactionsFilter>,
}

/// Filter of pending transactions. Absent fields match any transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransactionsFilter {
    /// Sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<EqualityFilter<Address>>,
    /// Recipient, or contract creations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ToFilter>,
    /// Gas limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<ValueFilter>,
    /// Gas price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<ValueFilter>,
    /// Transferred value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueFilter>,
    /// Sender nonce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<ValueFilter>,
}

/// Matches a field that equals the provided value.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EqualityFilter<T> {
    /// The expected value
    pub eq: T,
}

/// Matches the recipient of a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToFilter {
    /// The expected recipient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<Address>,
    /// Only match contract creations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ToAction>,
}

/// Special recipients of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToAction {
    /// The transaction deploys a contract
    ContractCreation,
}

/// Matches a numeric field. Bounds are sent as plain JSON numbers, not hex
/// quantities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValueFilter {
    /// Equal to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<u64>,
    /// Greater than
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<u64>,
    /// Less than
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<u64>,
}

/// Typed `parity` operations.
#[derive(Clone, Copy, Debug)]
pub struct ParityRpcMethods<'a>(BoundNamespace<'a>);

impl<'a> ParityRpcMethods<'a> {
    pub(crate) fn new(bound: BoundNamespace<'a>) -> Self {
        Self(bound)
    }

    /// Returns the transactions in the node's pending pool.
    ///
    /// The request always carries one parameter, which is `null` when no
    /// parameters are provided.
    pub async fn pending_transactions(
        &self,
        params: Option<&PendingTransactionsParams>,
    ) -> Result<Value, CallError> {
        const LOCAL: &str = "pending_transactions";

        let params = to_param(LOCAL, &params)?;
        self.request(LOCAL, vec![params]).await
    }
}

impl<'a> Deref for ParityRpcMethods<'a> {
    type Target = BoundNamespace<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
