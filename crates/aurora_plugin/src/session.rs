use std::{any::Any, fmt, sync::Arc};

use aurora_rpc_client::{
    HttpTransport, HttpTransportConfig, MethodInvocation, RpcClientError, RpcTransport,
};
use indexmap::{IndexMap, map::Entry};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    AuroraPlugin,
    context::{AttachError, RpcContext},
    dispatch::{self, CallError},
};

/// A plugin that can be registered with an [`RpcSession`].
pub trait RpcPlugin: Any + fmt::Debug + Send + Sync {
    /// The sub-accessor name under which the plugin is reachable.
    const PLUGIN_NAMESPACE: &'static str;

    /// Binds the plugin, and any plugins it hosts, to the transport of its
    /// parent.
    fn link(&mut self, parent: &RpcContext) -> Result<(), AttachError>;
}

/// Object-safe view of a registered [`RpcPlugin`].
trait HostedPlugin: fmt::Debug + Send + Sync {
    fn relink(&mut self, parent: &RpcContext) -> Result<(), AttachError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<PluginT: RpcPlugin> HostedPlugin for PluginT {
    fn relink(&mut self, parent: &RpcContext) -> Result<(), AttachError> {
        self.link(parent)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The enclosing client session. It owns the transport and hands it to its
/// plugins when they are registered.
///
/// A session is itself an [`RpcPlugin`], so sessions nest. Linking a session
/// into a parent replaces its transport with the parent's and re-links every
/// plugin it hosts.
#[derive(Debug, Default)]
pub struct RpcSession {
    context: RpcContext,
    plugins: IndexMap<&'static str, Box<dyn HostedPlugin>>,
}

impl RpcSession {
    /// Creates a session without a transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that owns the provided transport.
    pub fn with_transport(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            context: RpcContext::with_transport(transport),
            plugins: IndexMap::new(),
        }
    }

    /// Creates a session with an HTTP transport for the provided URL.
    pub fn from_url(url: &str) -> Result<Self, RpcClientError> {
        let transport = HttpTransport::new(url, None)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Creates a session with an HTTP transport with the provided
    /// configuration.
    pub fn from_config(config: &HttpTransportConfig) -> Result<Self, RpcClientError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Attaches a transport to a detached session.
    pub fn attach(&mut self, transport: Arc<dyn RpcTransport>) -> Result<(), AttachError> {
        self.context.attach(transport)
    }

    /// The session's transport context.
    pub fn context(&self) -> &RpcContext {
        &self.context
    }

    /// Links the plugin to the session's transport and makes it reachable
    /// under its plugin namespace.
    pub fn register_plugin<PluginT: RpcPlugin>(
        &mut self,
        mut plugin: PluginT,
    ) -> Result<(), AttachError> {
        let entry = match self.plugins.entry(PluginT::PLUGIN_NAMESPACE) {
            Entry::Occupied(_) => {
                return Err(AttachError::DuplicatePlugin {
                    namespace: PluginT::PLUGIN_NAMESPACE.to_string(),
                });
            }
            Entry::Vacant(entry) => entry,
        };

        plugin.link(&self.context)?;
        entry.insert(Box::new(plugin));

        log::debug!("Registered the {} plugin", PluginT::PLUGIN_NAMESPACE);
        Ok(())
    }

    /// Returns the registered plugin of the provided type.
    pub fn plugin<PluginT: RpcPlugin>(&self) -> Option<&PluginT> {
        self.plugins
            .get(PluginT::PLUGIN_NAMESPACE)?
            .as_any()
            .downcast_ref::<PluginT>()
    }

    /// Returns the registered plugin of the provided type.
    pub fn plugin_mut<PluginT: RpcPlugin>(&mut self) -> Option<&mut PluginT> {
        self.plugins
            .get_mut(PluginT::PLUGIN_NAMESPACE)?
            .as_any_mut()
            .downcast_mut::<PluginT>()
    }

    /// The namespaces of the registered plugins, in registration order.
    pub fn plugin_namespaces(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.keys().copied()
    }

    /// Sends an arbitrary method through the session's transport.
    pub async fn send_json_rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, CallError> {
        let transport = self
            .context
            .transport()
            .ok_or_else(|| CallError::NotInitialized {
                namespace: Self::PLUGIN_NAMESPACE.to_string(),
            })?;

        let value = transport
            .send(MethodInvocation::new(method, params))
            .await?;

        dispatch::decode_result(method, value)
    }
}

impl RpcPlugin for RpcSession {
    const PLUGIN_NAMESPACE: &'static str = "session";

    fn link(&mut self, parent: &RpcContext) -> Result<(), AttachError> {
        let transport = parent
            .transport()
            .ok_or(AttachError::NotInitialized)?
            .clone();

        if self.context.replace(transport).is_some() {
            log::warn!("Replacing the transport of a nested session");
        }

        for (namespace, plugin) in &mut self.plugins {
            plugin.relink(&self.context)?;
            log::debug!("Re-linked the {namespace} plugin");
        }

        Ok(())
    }
}

/// Access to the Aurora plugin of a session.
pub trait RpcSessionExt {
    /// The registered Aurora plugin, if any.
    fn aurora(&self) -> Option<&AuroraPlugin>;
}

impl RpcSessionExt for RpcSession {
    fn aurora(&self) -> Option<&AuroraPlugin> {
        self.plugin::<AuroraPlugin>()
    }
}
