use std::ops::Deref;

use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::{Address, B256, Bytes, U64, U256};
use alloy_rpc_types_eth::{Filter, TransactionRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    dispatch::{BoundNamespace, CallError, to_param},
    registry::{Namespace, ParamKind, ParamSpec, RegistryError},
};

/// Generic `eth` operations that Aurora does not serve.
const UNSUPPORTED: [&str; 7] = [
    "get_proof",
    "get_work",
    "send_transaction",
    "sign",
    "sign_transaction",
    "sign_typed_data",
    "submit_work",
];

pub(super) fn namespace() -> Result<Namespace, RegistryError> {
    let base = super::base::eth()?;
    let mut eth = Namespace::extending(super::ETH, &base);

    eth.define("new_block_filter", "eth_newBlockFilter", ParamSpec::none())?;
    eth.define(
        "new_pending_transaction_filter",
        "eth_newPendingTransactionFilter",
        ParamSpec::none(),
    )?;
    eth.define(
        "uninstall_filter",
        "eth_uninstallFilter",
        ParamSpec::required([ParamKind::Quantity]),
    )?;
    eth.define("get_compilers", "eth_getCompilers", ParamSpec::none())?;
    eth.define(
        "new_filter",
        "eth_newFilter",
        ParamSpec::required([ParamKind::Object]),
    )?;
    eth.define(
        "get_filter_changes",
        "eth_getFilterChanges",
        ParamSpec::required([ParamKind::Quantity]),
    )?;
    eth.define(
        "get_filter_logs",
        "eth_getFilterLogs",
        ParamSpec::required([ParamKind::Quantity]),
    )?;

    for local in UNSUPPORTED {
        eth.suppress(local);
    }

    Ok(eth)
}

/// Typed `eth` operations.
///
/// Scalar results are returned as the node's JSON string or boolean, other
/// results as raw JSON. Operations that Aurora does not serve have no typed
/// method.
#[derive(Clone, Copy, Debug)]
pub struct EthRpcMethods<'a>(BoundNamespace<'a>);

impl<'a> EthRpcMethods<'a> {
    pub(crate) fn new(bound: BoundNamespace<'a>) -> Self {
        Self(bound)
    }

    async fn request_with_optional_block<T: DeserializeOwned>(
        &self,
        local: &str,
        mut params: Vec<Value>,
        block: Option<BlockId>,
    ) -> Result<T, CallError> {
        if let Some(block) = block {
            params.push(to_param(local, &block)?);
        }
        self.request_as(local, params).await
    }

    /// Returns the Ethereum protocol version.
    pub async fn get_protocol_version(&self) -> Result<String, CallError> {
        self.request_as("get_protocol_version", vec![]).await
    }

    /// Returns `false`, or an object describing the sync progress.
    pub async fn is_syncing(&self) -> Result<Value, CallError> {
        self.request("is_syncing", vec![]).await
    }

    /// Returns the coinbase address.
    pub async fn get_coinbase(&self) -> Result<String, CallError> {
        self.request_as("get_coinbase", vec![]).await
    }

    /// Returns whether the node is mining.
    pub async fn is_mining(&self) -> Result<bool, CallError> {
        self.request_as("is_mining", vec![]).await
    }

    /// Returns the hash rate as a hex quantity.
    pub async fn get_hashrate(&self) -> Result<String, CallError> {
        self.request_as("get_hashrate", vec![]).await
    }

    /// Returns the gas price in wei as a hex quantity.
    pub async fn get_gas_price(&self) -> Result<String, CallError> {
        self.request_as("get_gas_price", vec![]).await
    }

    /// Returns the suggested priority fee in wei as a hex quantity.
    pub async fn get_max_priority_fee_per_gas(&self) -> Result<String, CallError> {
        self.request_as("get_max_priority_fee_per_gas", vec![]).await
    }

    /// Returns the fee history of the `block_count` blocks up to `newest_block`.
    pub async fn get_fee_history(
        &self,
        block_count: u64,
        newest_block: BlockNumberOrTag,
        reward_percentiles: Option<&[f64]>,
    ) -> Result<Value, CallError> {
        const LOCAL: &str = "get_fee_history";

        let mut params = vec![
            to_param(LOCAL, &U64::from(block_count))?,
            to_param(LOCAL, &newest_block)?,
        ];
        if let Some(reward_percentiles) = reward_percentiles {
            params.push(to_param(LOCAL, reward_percentiles)?);
        }
        self.request(LOCAL, params).await
    }

    /// Returns the accounts owned by the node.
    pub async fn get_accounts(&self) -> Result<Value, CallError> {
        self.request("get_accounts", vec![]).await
    }

    /// Requests access to the user's accounts.
    pub async fn request_accounts(&self) -> Result<Value, CallError> {
        self.request("request_accounts", vec![]).await
    }

    /// Returns the latest block number as a hex quantity.
    pub async fn get_block_number(&self) -> Result<String, CallError> {
        self.request_as("get_block_number", vec![]).await
    }

    /// Returns the chain ID as a hex quantity.
    pub async fn get_chain_id(&self) -> Result<String, CallError> {
        self.request_as("get_chain_id", vec![]).await
    }

    /// Returns the node's client version string.
    pub async fn get_node_info(&self) -> Result<String, CallError> {
        self.request_as("get_node_info", vec![]).await
    }

    /// Returns the balance of an account in wei as a hex quantity.
    pub async fn get_balance(
        &self,
        address: Address,
        block: Option<BlockId>,
    ) -> Result<String, CallError> {
        const LOCAL: &str = "get_balance";

        self.request_with_optional_block(LOCAL, vec![to_param(LOCAL, &address)?], block)
            .await
    }

    /// Returns the code at an address.
    pub async fn get_code(
        &self,
        address: Address,
        block: Option<BlockId>,
    ) -> Result<String, CallError> {
        const LOCAL: &str = "get_code";

        self.request_with_optional_block(LOCAL, vec![to_param(LOCAL, &address)?], block)
            .await
    }

    /// Returns the nonce of an account as a hex quantity.
    pub async fn get_transaction_count(
        &self,
        address: Address,
        block: Option<BlockId>,
    ) -> Result<String, CallError> {
        const LOCAL: &str = "get_transaction_count";

        self.request_with_optional_block(LOCAL, vec![to_param(LOCAL, &address)?], block)
            .await
    }

    /// Returns the value of a storage slot.
    pub async fn get_storage_at(
        &self,
        address: Address,
        slot: U256,
        block: Option<BlockId>,
    ) -> Result<String, CallError> {
        const LOCAL: &str = "get_storage_at";

        let params = vec![to_param(LOCAL, &address)?, to_param(LOCAL, &slot)?];
        self.request_with_optional_block(LOCAL, params, block).await
    }

    /// Returns the block with the provided hash, or `null`.
    pub async fn get_block_by_hash(
        &self,
        hash: B256,
        full_transactions: bool,
    ) -> Result<Value, CallError> {
        const LOCAL: &str = "get_block_by_hash";

        let params = vec![to_param(LOCAL, &hash)?, full_transactions.into()];
        self.request(LOCAL, params).await
    }

    /// Returns the block with the provided number, or `null`.
    pub async fn get_block_by_number(
        &self,
        number: BlockNumberOrTag,
        full_transactions: bool,
    ) -> Result<Value, CallError> {
        const LOCAL: &str = "get_block_by_number";

        let params = vec![to_param(LOCAL, &number)?, full_transactions.into()];
        self.request(LOCAL, params).await
    }

    /// Returns the number of transactions in a block.
    pub async fn get_block_transaction_count_by_hash(&self, hash: B256) -> Result<Value, CallError> {
        self.request_with_hash("get_block_transaction_count_by_hash", hash)
            .await
    }

    /// Returns the number of transactions in a block.
    pub async fn get_block_transaction_count_by_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Value, CallError> {
        self.request_with_number("get_block_transaction_count_by_number", number)
            .await
    }

    /// Returns the number of uncles of a block.
    pub async fn get_uncle_count_by_block_hash(&self, hash: B256) -> Result<Value, CallError> {
        self.request_with_hash("get_uncle_count_by_block_hash", hash)
            .await
    }

    /// Returns the number of uncles of a block.
    pub async fn get_uncle_count_by_block_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Value, CallError> {
        self.request_with_number("get_uncle_count_by_block_number", number)
            .await
    }

    /// Returns an uncle of a block, or `null`.
    pub async fn get_uncle_by_block_hash_and_index(
        &self,
        hash: B256,
        index: u64,
    ) -> Result<Value, CallError> {
        self.request_with_hash_and_index("get_uncle_by_block_hash_and_index", hash, index)
            .await
    }

    /// Returns an uncle of a block, or `null`.
    pub async fn get_uncle_by_block_number_and_index(
        &self,
        number: BlockNumberOrTag,
        index: u64,
    ) -> Result<Value, CallError> {
        self.request_with_number_and_index("get_uncle_by_block_number_and_index", number, index)
            .await
    }

    /// Returns the transaction with the provided hash, or `null`.
    pub async fn get_transaction_by_hash(&self, hash: B256) -> Result<Value, CallError> {
        self.request_with_hash("get_transaction_by_hash", hash).await
    }

    /// Returns a transaction of a block, or `null`.
    pub async fn get_transaction_by_block_hash_and_index(
        &self,
        hash: B256,
        index: u64,
    ) -> Result<Value, CallError> {
        self.request_with_hash_and_index("get_transaction_by_block_hash_and_index", hash, index)
            .await
    }

    /// Returns a transaction of a block, or `null`.
    pub async fn get_transaction_by_block_number_and_index(
        &self,
        number: BlockNumberOrTag,
        index: u64,
    ) -> Result<Value, CallError> {
        self.request_with_number_and_index(
            "get_transaction_by_block_number_and_index",
            number,
            index,
        )
        .await
    }

    /// Returns the receipt of a mined transaction, or `null`.
    pub async fn get_transaction_receipt(&self, hash: B256) -> Result<Value, CallError> {
        self.request_with_hash("get_transaction_receipt", hash).await
    }

    /// Submits a signed, RLP-encoded transaction and returns its hash.
    pub async fn send_signed_transaction(&self, transaction: &Bytes) -> Result<String, CallError> {
        const LOCAL: &str = "send_signed_transaction";

        self.request_as(LOCAL, vec![to_param(LOCAL, transaction)?])
            .await
    }

    /// Executes a message call without creating a transaction.
    pub async fn call(
        &self,
        request: &TransactionRequest,
        block: Option<BlockId>,
    ) -> Result<String, CallError> {
        const LOCAL: &str = "call";

        self.request_with_optional_block(LOCAL, vec![to_param(LOCAL, request)?], block)
            .await
    }

    /// Estimates the gas needed by a transaction, as a hex quantity.
    pub async fn estimate_gas(
        &self,
        request: &TransactionRequest,
        block: Option<BlockId>,
    ) -> Result<String, CallError> {
        const LOCAL: &str = "estimate_gas";

        self.request_with_optional_block(LOCAL, vec![to_param(LOCAL, request)?], block)
            .await
    }

    /// Returns the access list of a transaction.
    pub async fn create_access_list(
        &self,
        request: &TransactionRequest,
        block: Option<BlockId>,
    ) -> Result<Value, CallError> {
        const LOCAL: &str = "create_access_list";

        self.request_with_optional_block(LOCAL, vec![to_param(LOCAL, request)?], block)
            .await
    }

    /// Returns the logs matching a filter.
    pub async fn get_past_logs(&self, filter: &Filter) -> Result<Value, CallError> {
        const LOCAL: &str = "get_past_logs";

        self.request(LOCAL, vec![to_param(LOCAL, filter)?]).await
    }

    /// Installs a filter for new blocks and returns its ID.
    pub async fn new_block_filter(&self) -> Result<String, CallError> {
        self.request_as("new_block_filter", vec![]).await
    }

    /// Installs a filter for new pending transactions and returns its ID.
    pub async fn new_pending_transaction_filter(&self) -> Result<String, CallError> {
        self.request_as("new_pending_transaction_filter", vec![])
            .await
    }

    /// Uninstalls a filter. Returns whether it existed.
    pub async fn uninstall_filter(&self, id: U256) -> Result<bool, CallError> {
        const LOCAL: &str = "uninstall_filter";

        self.request_as(LOCAL, vec![to_param(LOCAL, &id)?]).await
    }

    /// Returns the available compilers.
    pub async fn get_compilers(&self) -> Result<Value, CallError> {
        self.request("get_compilers", vec![]).await
    }

    /// Installs a log filter and returns its ID.
    pub async fn new_filter(&self, filter: &Filter) -> Result<String, CallError> {
        const LOCAL: &str = "new_filter";

        self.request_as(LOCAL, vec![to_param(LOCAL, filter)?]).await
    }

    /// Returns the changes since the last poll of a filter.
    pub async fn get_filter_changes(&self, id: U256) -> Result<Value, CallError> {
        const LOCAL: &str = "get_filter_changes";

        self.request(LOCAL, vec![to_param(LOCAL, &id)?]).await
    }

    /// Returns all logs matching a log filter.
    pub async fn get_filter_logs(&self, id: U256) -> Result<Value, CallError> {
        const LOCAL: &str = "get_filter_logs";

        self.request(LOCAL, vec![to_param(LOCAL, &id)?]).await
    }

    async fn request_with_hash(&self, local: &str, hash: B256) -> Result<Value, CallError> {
        self.request(local, vec![to_param(local, &hash)?]).await
    }

    async fn request_with_number(
        &self,
        local: &str,
        number: BlockNumberOrTag,
    ) -> Result<Value, CallError> {
        self.request(local, vec![to_param(local, &number)?]).await
    }

    async fn request_with_hash_and_index(
        &self,
        local: &str,
        hash: B256,
        index: u64,
    ) -> Result<Value, CallError> {
        let params = vec![to_param(local, &hash)?, to_param(local, &U64::from(index))?];
        self.request(local, params).await
    }

    async fn request_with_number_and_index(
        &self,
        local: &str,
        number: BlockNumberOrTag,
        index: u64,
    ) -> Result<Value, CallError> {
        let params = vec![to_param(local, &number)?, to_param(local, &U64::from(index))?];
        self.request(local, params).await
    }
}

impl<'a> Deref for EthRpcMethods<'a> {
    type Target = BoundNamespace<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
