use std::sync::Arc;

use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::address;
use aurora_plugin::{
    AttachError, AuroraPlugin, CallError, Unavailability,
    namespaces::{PendingTransactionsParams, ETH},
    registry::ParamError,
};
use aurora_rpc_client::{MethodInvocation, RpcClientError};
use aurora_test_utils::StubTransport;
use serde_json::json;

const SHA3_OF_0XAB: &str = "0x468fc9c005382579139846222b7b0aebc9182ba073b2455938a86d9753bfb078";

fn plugin_with(transport: &Arc<StubTransport>) -> AuroraPlugin {
    AuroraPlugin::with_transport(transport.clone())
}

#[tokio::test]
async fn sha3_returns_node_result_unmodified() -> anyhow::Result<()> {
    let transport = Arc::new(StubTransport::new().with_result("web3_sha3", json!(SHA3_OF_0XAB)));
    let plugin = plugin_with(&transport);

    let hash = plugin.web3().sha3("0xab").await?;

    assert_eq!(hash, SHA3_OF_0XAB);
    assert_eq!(
        transport.invocations(),
        [MethodInvocation::new("web3_sha3", vec![json!("0xab")])]
    );

    Ok(())
}

#[tokio::test]
async fn sha3_rejects_data_that_is_not_prefixed_hex() {
    let transport = Arc::new(StubTransport::new().with_result("web3_sha3", json!(SHA3_OF_0XAB)));
    let plugin = plugin_with(&transport);

    for data in ["ab", "0xabc", "0xzz", "hello"] {
        let error = plugin
            .web3()
            .sha3(data)
            .await
            .expect_err("data is not prefixed even-length hex");
        assert!(matches!(
            error,
            CallError::InvalidArguments {
                method,
                reason: ParamError::WrongKind { position: 0, .. },
            } if method == "web3_sha3"
        ));
    }

    assert_eq!(transport.invocation_count(), 0);
}

#[tokio::test]
async fn typed_calls_send_declared_wire_method_and_params() -> anyhow::Result<()> {
    let transport = Arc::new(
        StubTransport::new()
            .with_result("eth_getBalance", json!("0x0"))
            .with_result("eth_getBlockByNumber", json!(null))
            .with_result("web3_clientVersion", json!("Aurora"))
            .with_result("net_version", json!("1313161554")),
    );
    let plugin = plugin_with(&transport);
    let account = address!("0x1111111111111111111111111111111111111111");

    assert_eq!(
        plugin
            .eth()
            .get_balance(account, Some(BlockId::latest()))
            .await?,
        "0x0"
    );
    assert_eq!(
        plugin
            .eth()
            .get_block_by_number(BlockNumberOrTag::Number(0x5c29fb), false)
            .await?,
        json!(null)
    );
    assert_eq!(plugin.eth().get_node_info().await?, "Aurora");
    assert_eq!(plugin.net().get_id().await?, "1313161554");

    assert_eq!(
        transport.invocations(),
        [
            MethodInvocation::new(
                "eth_getBalance",
                vec![
                    json!("0x1111111111111111111111111111111111111111"),
                    json!("latest"),
                ],
            ),
            MethodInvocation::new("eth_getBlockByNumber", vec![json!("0x5c29fb"), json!(false)]),
            MethodInvocation::new("web3_clientVersion", vec![]),
            MethodInvocation::new("net_version", vec![]),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn optional_block_is_omitted() -> anyhow::Result<()> {
    let transport = Arc::new(StubTransport::new().with_result("eth_getCode", json!("0x")));
    let plugin = plugin_with(&transport);
    let account = address!("0x1111111111111111111111111111111111111111");

    assert_eq!(plugin.eth().get_code(account, None).await?, "0x");
    assert_eq!(
        transport.invocations(),
        [MethodInvocation::new(
            "eth_getCode",
            vec![json!("0x1111111111111111111111111111111111111111")],
        )]
    );

    Ok(())
}

#[tokio::test]
async fn suppressed_operation_never_reaches_transport() -> anyhow::Result<()> {
    let transport = Arc::new(
        StubTransport::new()
            .with_result("eth_blockNumber", json!("0x5c29fb"))
            .with_result("eth_sendTransaction", json!("0x00")),
    );
    let plugin = plugin_with(&transport);

    assert_eq!(plugin.eth().get_block_number().await?, "0x5c29fb");

    for _ in 0..2 {
        let error = plugin
            .eth()
            .request("send_transaction", vec![json!({})])
            .await
            .expect_err("send_transaction is suppressed");
        assert!(matches!(
            error,
            CallError::MethodNotSupported {
                ref namespace,
                ref method,
                reason: Unavailability::Suppressed,
            } if namespace == ETH && method == "send_transaction"
        ));
    }

    let error = plugin
        .request(ETH, "get_work", vec![])
        .await
        .expect_err("get_work is suppressed");
    assert!(matches!(error, CallError::MethodNotSupported { .. }));

    assert_eq!(transport.invocation_count(), 1);

    Ok(())
}

#[tokio::test]
async fn detached_plugin_is_not_initialized_until_attached() -> anyhow::Result<()> {
    let mut plugin = AuroraPlugin::new();

    let error = plugin
        .net()
        .is_listening()
        .await
        .expect_err("no transport attached");
    assert!(matches!(
        error,
        CallError::NotInitialized { namespace } if namespace == "net"
    ));

    let transport = Arc::new(StubTransport::new().with_result("net_listening", json!(true)));
    plugin.attach(transport.clone())?;
    assert!(plugin.net().is_listening().await?);

    let error = plugin
        .attach(transport)
        .expect_err("plugin is already attached");
    assert!(matches!(error, AttachError::AlreadyAttached));

    Ok(())
}

#[tokio::test]
async fn invalid_arguments_fail_before_sending() -> anyhow::Result<()> {
    let transport = Arc::new(StubTransport::new());
    let plugin = plugin_with(&transport);

    let error = plugin
        .eth()
        .request("get_balance", vec![json!("0x1234")])
        .await
        .expect_err("address is too short");
    assert!(matches!(
        error,
        CallError::InvalidArguments { method, .. } if method == "eth_getBalance"
    ));

    let error = plugin
        .txpool()
        .request("status", vec![json!(1)])
        .await
        .expect_err("status takes no params");
    assert!(matches!(error, CallError::InvalidArguments { .. }));

    assert_eq!(transport.invocation_count(), 0);

    Ok(())
}

#[tokio::test]
async fn parity_pending_transactions_sends_single_param() -> anyhow::Result<()> {
    let transport = Arc::new(
        StubTransport::new().with_result("parity_pendingTransactions", json!([])),
    );
    let plugin = plugin_with(&transport);

    plugin.parity().pending_transactions(None).await?;
    plugin
        .parity()
        .pending_transactions(Some(&PendingTransactionsParams {
            limit: Some(5),
            filter: None,
        }))
        .await?;

    assert_eq!(
        transport.invocations(),
        [
            MethodInvocation::new("parity_pendingTransactions", vec![json!(null)]),
            MethodInvocation::new("parity_pendingTransactions", vec![json!({ "limit": 5 })]),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn node_errors_are_passed_through() {
    let transport = Arc::new(StubTransport::new());
    let plugin = plugin_with(&transport);

    let error = plugin
        .txpool()
        .content()
        .await
        .expect_err("stub does not know txpool_content");
    assert!(matches!(
        error,
        CallError::Transport(RpcClientError::JsonRpcError { error, .. }) if error.code == -32601
    ));
    assert_eq!(transport.invocation_count(), 1);
}
