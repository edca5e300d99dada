use std::collections::HashMap;

use aurora_rpc_client::{
    HttpTransport, HttpTransportConfig, MethodInvocation, RpcClientError, RpcTransport,
};
use mockito::Matcher;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn config_without_retries(url: String) -> HttpTransportConfig {
    HttpTransportConfig {
        max_retries: 0,
        ..HttpTransportConfig::new(url)
    }
}

#[tokio::test]
async fn send_request_body_400_status() {
    const STATUS_CODE: u16 = 400;

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(STATUS_CODE.into())
        .with_header("content-type", "text/plain")
        .create_async()
        .await;

    let error = HttpTransport::new(&server.url(), None)
        .expect("url ok")
        .send(MethodInvocation::new("net_version", vec![]))
        .await
        .expect_err("should have failed to due to a HTTP status error");

    if let RpcClientError::HttpStatus(error) = error {
        assert_eq!(
            reqwest::Error::from(error).status(),
            Some(StatusCode::from_u16(STATUS_CODE).unwrap())
        );
    } else {
        unreachable!("Invalid error: {error}");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_is_sent_once_without_retries() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let transport = HttpTransport::from_config(&config_without_retries(server.url()))?;
    let error = transport
        .send(MethodInvocation::new("net_version", vec![]))
        .await
        .expect_err("should have failed due to a HTTP status error");

    assert!(matches!(error, RpcClientError::HttpStatus(_)));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn result_is_returned_unmodified() -> anyhow::Result<()> {
    const HASH: &str = "0x468fc9c005382579139846222b7b0aebc9182ba073b2455938a86d9753bfb078";

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "web3_sha3",
            "params": ["0xab"],
        })))
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"jsonrpc":"2.0","id":0,"result":"{HASH}"}}"#))
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url(), None)?;
    let result = transport
        .send(MethodInvocation::new("web3_sha3", vec![json!("0xab")]))
        .await?;

    assert_eq!(result, json!(HASH));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn json_rpc_error_keeps_diagnostics() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_body(
            r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32601,"message":"Method not found","data":{"method":"eth_getWork"}}}"#,
        )
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url(), None)?;
    let error = transport
        .send(MethodInvocation::new("eth_getWork", vec![]))
        .await
        .expect_err("node returned an error object");

    if let RpcClientError::JsonRpcError { error, request } = error {
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found");
        assert_eq!(error.data, Some(json!({ "method": "eth_getWork" })));
        assert!(request.contains("eth_getWork"));
    } else {
        unreachable!("Invalid error: {error}");
    }

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn mismatched_response_id_is_rejected() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body(r#"{"jsonrpc":"2.0","id":42,"result":"0x1"}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url(), None)?;
    let error = transport
        .send(MethodInvocation::new("eth_blockNumber", vec![]))
        .await
        .expect_err("response id does not match the request id");

    assert!(matches!(
        error,
        RpcClientError::InvalidId {
            id: aurora_rpc_client::jsonrpc::Id::Num(42),
            ..
        }
    ));

    Ok(())
}

#[tokio::test]
async fn malformed_response_is_rejected() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body("<html>rate limited</html>")
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url(), None)?;
    let error = transport
        .send(MethodInvocation::new("eth_blockNumber", vec![]))
        .await
        .expect_err("response is not JSON");

    if let RpcClientError::InvalidResponse { response, .. } = error {
        assert_eq!(response, "<html>rate limited</html>");
    } else {
        unreachable!("Invalid error: {error}");
    }

    Ok(())
}

#[tokio::test]
async fn configured_headers_are_sent() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("x-api-key", "secret")
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":true}"#)
        .create_async()
        .await;

    let config = HttpTransportConfig {
        http_headers: Some(HashMap::from([(
            "x-api-key".to_string(),
            "secret".to_string(),
        )])),
        ..config_without_retries(server.url())
    };
    let transport = HttpTransport::from_config(&config)?;

    let listening = transport
        .send(MethodInvocation::new("net_listening", vec![]))
        .await?;

    assert_eq!(listening, json!(true));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn concurrent_requests_receive_their_own_responses() -> anyhow::Result<()> {
    const CALLS: usize = 8;

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getTransactionReceipt",
        })))
        .with_header("content-type", "application/json")
        .with_body_from_request(|request| {
            let body: Value = request
                .body()
                .ok()
                .and_then(|body| serde_json::from_slice(body).ok())
                .unwrap_or_default();
            let response = json!({
                "jsonrpc": "2.0",
                "id": body.get("id"),
                "result": { "hash": body.pointer("/params/0") },
            });
            serde_json::to_vec(&response).unwrap_or_default()
        })
        .expect(CALLS)
        .create_async()
        .await;

    let transport = HttpTransport::from_config(&config_without_retries(server.url()))?;

    let hashes: Vec<_> = (0..CALLS).map(|index| format!("0x{index:064x}")).collect();
    let receipts = futures::future::join_all(hashes.iter().map(|hash| {
        transport.send(MethodInvocation::new(
            "eth_getTransactionReceipt",
            vec![json!(hash)],
        ))
    }))
    .await;

    for (hash, receipt) in hashes.iter().zip(receipts) {
        assert_eq!(receipt?, json!({ "hash": hash }));
    }

    mock.assert_async().await;

    Ok(())
}

#[cfg(feature = "test-remote")]
mod aurora {
    use aurora_rpc_client::AuroraNetwork;
    use aurora_test_utils::env::get_aurora_url;

    use super::*;

    #[tokio::test]
    async fn net_version_matches_known_network() -> anyhow::Result<()> {
        let url = get_aurora_url();
        let transport = HttpTransport::new(&url, None)?;

        let version = transport
            .send(MethodInvocation::new("net_version", vec![]))
            .await?;

        let version: String = serde_json::from_value(version)?;
        if let Some(network) = AuroraNetwork::from_url(transport.url()) {
            assert_eq!(version, network.chain_id().to_string());
        }
        assert!(version.parse::<u64>().is_ok());

        Ok(())
    }
}
