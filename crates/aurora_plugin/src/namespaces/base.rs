//! The generic Ethereum namespaces that the Aurora namespaces extend.

use crate::registry::{
    Namespace, ParamKind::{Address, Array, BlockId, Bool, Data, Hash, Object, Quantity},
    ParamSpec, RegistryError,
};

/// The generic `eth` namespace.
pub fn eth() -> Result<Namespace, RegistryError> {
    let mut eth = Namespace::new(super::ETH);

    for (local, method) in [
        ("get_protocol_version", "eth_protocolVersion"),
        ("is_syncing", "eth_syncing"),
        ("get_coinbase", "eth_coinbase"),
        ("is_mining", "eth_mining"),
        ("get_hashrate", "eth_hashrate"),
        ("get_gas_price", "eth_gasPrice"),
        ("get_max_priority_fee_per_gas", "eth_maxPriorityFeePerGas"),
        ("get_accounts", "eth_accounts"),
        ("request_accounts", "eth_requestAccounts"),
        ("get_block_number", "eth_blockNumber"),
        ("get_chain_id", "eth_chainId"),
        ("get_node_info", "web3_clientVersion"),
        ("get_work", "eth_getWork"),
    ] {
        eth.define(local, method, ParamSpec::none())?;
    }

    eth.define(
        "get_fee_history",
        "eth_feeHistory",
        ParamSpec::required([Quantity, BlockId]).with_optional([Array]),
    )?;

    for (local, method) in [
        ("get_balance", "eth_getBalance"),
        ("get_code", "eth_getCode"),
        ("get_transaction_count", "eth_getTransactionCount"),
    ] {
        eth.define(
            local,
            method,
            ParamSpec::required([Address]).with_optional([BlockId]),
        )?;
    }
    eth.define(
        "get_storage_at",
        "eth_getStorageAt",
        ParamSpec::required([Address, Quantity]).with_optional([BlockId]),
    )?;

    eth.define(
        "get_block_by_hash",
        "eth_getBlockByHash",
        ParamSpec::required([Hash, Bool]),
    )?;
    eth.define(
        "get_block_by_number",
        "eth_getBlockByNumber",
        ParamSpec::required([BlockId, Bool]),
    )?;

    for (local, method) in [
        (
            "get_block_transaction_count_by_hash",
            "eth_getBlockTransactionCountByHash",
        ),
        ("get_uncle_count_by_block_hash", "eth_getUncleCountByBlockHash"),
        ("get_transaction_by_hash", "eth_getTransactionByHash"),
        ("get_transaction_receipt", "eth_getTransactionReceipt"),
    ] {
        eth.define(local, method, ParamSpec::required([Hash]))?;
    }
    for (local, method) in [
        (
            "get_block_transaction_count_by_number",
            "eth_getBlockTransactionCountByNumber",
        ),
        (
            "get_uncle_count_by_block_number",
            "eth_getUncleCountByBlockNumber",
        ),
    ] {
        eth.define(local, method, ParamSpec::required([BlockId]))?;
    }
    for (local, method) in [
        (
            "get_uncle_by_block_hash_and_index",
            "eth_getUncleByBlockHashAndIndex",
        ),
        (
            "get_transaction_by_block_hash_and_index",
            "eth_getTransactionByBlockHashAndIndex",
        ),
    ] {
        eth.define(local, method, ParamSpec::required([Hash, Quantity]))?;
    }
    for (local, method) in [
        (
            "get_uncle_by_block_number_and_index",
            "eth_getUncleByBlockNumberAndIndex",
        ),
        (
            "get_transaction_by_block_number_and_index",
            "eth_getTransactionByBlockNumberAndIndex",
        ),
    ] {
        eth.define(local, method, ParamSpec::required([BlockId, Quantity]))?;
    }

    eth.define(
        "send_transaction",
        "eth_sendTransaction",
        ParamSpec::required([Object]),
    )?;
    eth.define(
        "send_signed_transaction",
        "eth_sendRawTransaction",
        ParamSpec::required([Data]),
    )?;
    eth.define("sign", "eth_sign", ParamSpec::required([Address, Data]))?;
    eth.define(
        "sign_transaction",
        "eth_signTransaction",
        ParamSpec::required([Object]),
    )?;
    eth.define(
        "sign_typed_data",
        "eth_signTypedData_v4",
        ParamSpec::required([Address, Object]),
    )?;

    for (local, method) in [
        ("call", "eth_call"),
        ("estimate_gas", "eth_estimateGas"),
        ("create_access_list", "eth_createAccessList"),
    ] {
        eth.define(
            local,
            method,
            ParamSpec::required([Object]).with_optional([BlockId]),
        )?;
    }
    eth.define("get_past_logs", "eth_getLogs", ParamSpec::required([Object]))?;

    eth.define(
        "submit_work",
        "eth_submitWork",
        ParamSpec::required([Data, Hash, Hash]),
    )?;
    eth.define(
        "get_proof",
        "eth_getProof",
        ParamSpec::required([Address, Array, BlockId]),
    )?;

    Ok(eth)
}

/// The generic `net` namespace.
pub fn net() -> Result<Namespace, RegistryError> {
    let mut net = Namespace::new(super::NET);
    net.define("get_id", "net_version", ParamSpec::none())?;
    net.define("get_peer_count", "net_peerCount", ParamSpec::none())?;
    net.define("is_listening", "net_listening", ParamSpec::none())?;

    Ok(net)
}
