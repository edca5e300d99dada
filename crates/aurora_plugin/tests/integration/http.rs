use aurora_plugin::{AuroraPlugin, CallError};
use aurora_rpc_client::{HttpTransportConfig, RpcClientError};
use mockito::Matcher;
use serde_json::json;

fn plugin_for(server: &mockito::Server) -> anyhow::Result<AuroraPlugin> {
    let config = HttpTransportConfig {
        max_retries: 0,
        ..HttpTransportConfig::new(server.url())
    };

    Ok(AuroraPlugin::from_config(&config)?)
}

#[tokio::test]
async fn block_number_over_http() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
        })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":"0x5c29fb"}"#)
        .expect(1)
        .create_async()
        .await;

    let plugin = plugin_for(&server)?;
    assert_eq!(plugin.eth().get_block_number().await?, "0x5c29fb");

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn suppressed_operation_sends_nothing() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;

    let plugin = plugin_for(&server)?;
    let error = plugin
        .eth()
        .request("sign", vec![json!("0x1111111111111111111111111111111111111111"), json!("0x")])
        .await
        .expect_err("sign is suppressed");
    assert!(matches!(error, CallError::MethodNotSupported { .. }));

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn node_error_object_is_kept_intact() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body(
            r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32000,"message":"execution reverted","data":"0x08c379a0"}}"#,
        )
        .create_async()
        .await;

    let plugin = plugin_for(&server)?;
    let error = plugin
        .eth()
        .request("call", vec![json!({ "to": "0x1111111111111111111111111111111111111111" })])
        .await
        .expect_err("node reverted");

    if let CallError::Transport(RpcClientError::JsonRpcError { error, .. }) = error {
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "execution reverted");
        assert_eq!(error.data, Some(json!("0x08c379a0")));
    } else {
        unreachable!("Invalid error: {error}");
    }

    Ok(())
}

#[tokio::test]
async fn http_status_error_is_passed_through() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(429)
        .create_async()
        .await;

    let plugin = plugin_for(&server)?;
    let error = plugin
        .net()
        .get_peer_count()
        .await
        .expect_err("rate limited");
    assert!(matches!(
        error,
        CallError::Transport(RpcClientError::HttpStatus(_))
    ));

    Ok(())
}

#[cfg(feature = "test-remote")]
mod aurora {
    use aurora_rpc_client::AuroraNetwork;
    use aurora_test_utils::env::get_aurora_url;

    use super::*;

    #[tokio::test]
    async fn chain_id_and_network_id_agree() -> anyhow::Result<()> {
        let plugin = AuroraPlugin::from_url(&get_aurora_url())?;

        let chain_id = plugin.eth().get_chain_id().await?;
        let network_id = plugin.net().get_id().await?;

        let chain_id = u64::from_str_radix(chain_id.trim_start_matches("0x"), 16)?;
        assert_eq!(chain_id.to_string(), network_id);

        if let Some(network) = AuroraNetwork::from_chain_id(chain_id) {
            assert_eq!(network.chain_id(), chain_id);
        }

        Ok(())
    }

    #[tokio::test]
    async fn unsupported_proof_is_rejected_locally() {
        let plugin = AuroraPlugin::from_url(&get_aurora_url()).expect("url is valid");

        let error = plugin
            .eth()
            .request(
                "get_proof",
                vec![
                    json!("0x1111111111111111111111111111111111111111"),
                    json!([]),
                    json!("latest"),
                ],
            )
            .await
            .expect_err("get_proof is suppressed");
        assert!(matches!(error, CallError::MethodNotSupported { .. }));
    }
}
