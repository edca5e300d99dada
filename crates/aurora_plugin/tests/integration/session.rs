use std::sync::Arc;

use aurora_plugin::{AuroraPlugin, RpcPlugin, RpcSession, RpcSessionExt};
use aurora_rpc_client::{MethodInvocation, RpcTransport};
use aurora_test_utils::StubTransport;
use serde_json::json;

#[tokio::test]
async fn registered_plugin_uses_session_transport() -> anyhow::Result<()> {
    let transport = Arc::new(StubTransport::new().with_result("eth_chainId", json!("0x4e454152")));
    let mut session = RpcSession::with_transport(transport.clone());

    session.register_plugin(AuroraPlugin::new())?;

    let aurora = session.aurora().expect("plugin is registered");
    assert_eq!(aurora.eth().get_chain_id().await?, "0x4e454152");
    assert_eq!(
        transport.invocations(),
        [MethodInvocation::new("eth_chainId", vec![])]
    );

    let shared = aurora.context().transport().zip(session.context().transport());
    assert!(shared.is_some_and(|(plugin, session)| Arc::ptr_eq(plugin, session)));

    Ok(())
}

#[tokio::test]
async fn linking_replaces_plugin_transport() -> anyhow::Result<()> {
    let own = Arc::new(StubTransport::new().with_result("net_version", json!("1313161555")));
    let session_transport =
        Arc::new(StubTransport::new().with_result("net_version", json!("1313161554")));

    let mut session = RpcSession::with_transport(session_transport.clone());
    session.register_plugin(AuroraPlugin::with_transport(own.clone()))?;

    let aurora = session.aurora().expect("plugin is registered");
    assert_eq!(aurora.net().get_id().await?, "1313161554");
    assert_eq!(own.invocation_count(), 0);
    assert_eq!(session_transport.invocation_count(), 1);

    Ok(())
}

#[test]
fn plugin_is_reachable_under_its_namespace() -> anyhow::Result<()> {
    let transport: Arc<dyn RpcTransport> = Arc::new(StubTransport::new());
    let mut session = RpcSession::with_transport(transport);
    session.register_plugin(AuroraPlugin::new())?;

    assert_eq!(AuroraPlugin::PLUGIN_NAMESPACE, "aurora");
    assert_eq!(
        session.plugin_namespaces().collect::<Vec<_>>(),
        [AuroraPlugin::PLUGIN_NAMESPACE]
    );
    assert!(session.plugin::<AuroraPlugin>().is_some());
    assert!(
        session
            .plugin_mut::<AuroraPlugin>()
            .is_some_and(|plugin| plugin.is_attached())
    );

    Ok(())
}

#[tokio::test]
async fn outer_transport_reaches_doubly_nested_plugin() -> anyhow::Result<()> {
    let guest_transport =
        Arc::new(StubTransport::new().with_result("eth_chainId", json!("0x1")));
    let host_transport =
        Arc::new(StubTransport::new().with_result("eth_chainId", json!("0x4e454152")));

    let mut inner = RpcSession::with_transport(guest_transport.clone());
    inner.register_plugin(AuroraPlugin::new())?;

    let mut middle = RpcSession::with_transport(guest_transport.clone());
    middle.register_plugin(inner)?;

    let mut outer = RpcSession::with_transport(host_transport.clone());
    outer.register_plugin(middle)?;

    let aurora = outer
        .plugin::<RpcSession>()
        .and_then(RpcSession::plugin::<RpcSession>)
        .and_then(RpcSessionExt::aurora)
        .expect("aurora is nested two sessions deep");

    assert_eq!(aurora.eth().get_chain_id().await?, "0x4e454152");
    assert_eq!(
        host_transport.invocations(),
        [MethodInvocation::new("eth_chainId", vec![])]
    );
    assert_eq!(guest_transport.invocation_count(), 0);

    let shared = aurora.context().transport().zip(outer.context().transport());
    assert!(shared.is_some_and(|(plugin, host)| Arc::ptr_eq(plugin, host)));

    Ok(())
}

#[test]
fn session_is_reachable_under_its_namespace() -> anyhow::Result<()> {
    let mut outer = RpcSession::with_transport(Arc::new(StubTransport::new()));
    outer.register_plugin(RpcSession::with_transport(Arc::new(StubTransport::new())))?;
    outer.register_plugin(AuroraPlugin::new())?;

    assert_eq!(
        outer.plugin_namespaces().collect::<Vec<_>>(),
        [RpcSession::PLUGIN_NAMESPACE, AuroraPlugin::PLUGIN_NAMESPACE]
    );

    Ok(())
}
