//! The provider contract and its registry-backed implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{
    NodeAddress, NodeCondition, NodeDaemonEndpoints, Pod, PodStatus,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use hollowlet_core::PodKey;

use crate::config::NodeConfig;
use crate::node;
use crate::registry::PodRegistry;
use crate::Result;

/// A readable stream of container log output.
pub type LogStream = Box<dyn AsyncRead + Send + Unpin>;

/// Options accompanying a container log request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Return only the last N lines.
    pub tail_lines: Option<i64>,
    /// Prefix each line with its timestamp.
    pub timestamps: bool,
    /// Return logs from the previous container instance.
    pub previous: bool,
}

/// I/O streams attached to an exec request.
#[derive(Default)]
pub struct AttachStreams {
    /// Stream feeding the command's stdin.
    pub stdin: Option<Box<dyn AsyncRead + Send + Unpin>>,
    /// Sink for the command's stdout.
    pub stdout: Option<Box<dyn AsyncWrite + Send + Unpin>>,
    /// Sink for the command's stderr.
    pub stderr: Option<Box<dyn AsyncWrite + Send + Unpin>>,
    /// Whether the command runs under a TTY.
    pub tty: bool,
}

/// The operation set a node agent delegates to this provider.
///
/// This is the seam a real execution backend re-implements. Everything
/// the agent does to pods on this node goes through these operations;
/// the node-status surface is read-only and independent of pod state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Accept a pod and make it visible as running.
    ///
    /// # Errors
    ///
    /// Returns an error if a pod with the same identity already exists
    /// or the manifest has no identity.
    async fn create_pod(&self, pod: Pod) -> Result<()>;

    /// Accept an updated pod spec. Always succeeds without applying it.
    ///
    /// # Errors
    ///
    /// Never errors in this implementation; the signature allows a real
    /// backend to fail.
    async fn update_pod(&self, pod: Pod) -> Result<()>;

    /// Delete the pod with the given identity. Idempotent.
    ///
    /// # Errors
    ///
    /// Never errors in this implementation; deleting an absent pod
    /// succeeds.
    async fn delete_pod(&self, key: &PodKey) -> Result<()>;

    /// Get the pod with the given identity.
    ///
    /// # Errors
    ///
    /// Returns an error if no such pod is registered.
    async fn get_pod(&self, key: &PodKey) -> Result<Pod>;

    /// List all pods registered on this node.
    ///
    /// # Errors
    ///
    /// Never errors in this implementation.
    async fn get_pods(&self) -> Result<Vec<Pod>>;

    /// Get the observed status of the pod with the given identity.
    ///
    /// # Errors
    ///
    /// Returns an error if no such pod is registered.
    async fn get_pod_status(&self, key: &PodKey) -> Result<PodStatus>;

    /// Retrieve logs for a container.
    ///
    /// The stub backend has no logs: the returned stream is empty and
    /// already exhausted. Callers must treat "no logs" as the defined
    /// behavior, not a transport failure.
    ///
    /// # Errors
    ///
    /// Never errors in this implementation.
    async fn get_container_logs(
        &self,
        key: &PodKey,
        container: &str,
        opts: LogOptions,
    ) -> Result<LogStream>;

    /// Execute a command in a container.
    ///
    /// The stub backend executes nothing and never touches the attached
    /// streams. Callers must not assume the command ran.
    ///
    /// # Errors
    ///
    /// Never errors in this implementation.
    async fn run_in_container(
        &self,
        key: &PodKey,
        container: &str,
        command: Vec<String>,
        attach: AttachStreams,
    ) -> Result<()>;

    /// Resource capacity this node advertises.
    fn capacity(&self) -> BTreeMap<String, Quantity>;

    /// Current node conditions.
    fn node_conditions(&self) -> Vec<NodeCondition>;

    /// Addresses the node is reachable at.
    fn node_addresses(&self) -> Vec<NodeAddress>;

    /// Daemon endpoints exposed by the node.
    fn node_daemon_endpoints(&self) -> NodeDaemonEndpoints;

    /// Operating system family this provider supports.
    fn operating_system(&self) -> String;
}

/// Registry-backed provider with a no-op execution backend.
///
/// Pods accepted here are held in the [`PodRegistry`] and reported as
/// running; nothing is actually executed.
pub struct NodeProvider {
    registry: PodRegistry,
    config: NodeConfig,
}

impl NodeProvider {
    /// Create a new provider for a node with the given configuration.
    #[must_use]
    pub fn new(config: NodeConfig) -> Self {
        Self {
            registry: PodRegistry::new(),
            config,
        }
    }

    /// Get a reference to the node configuration.
    #[must_use]
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for NodeProvider {
    async fn create_pod(&self, pod: Pod) -> Result<()> {
        self.registry.create(pod)
    }

    async fn update_pod(&self, pod: Pod) -> Result<()> {
        self.registry.update(&pod);
        Ok(())
    }

    async fn delete_pod(&self, key: &PodKey) -> Result<()> {
        self.registry.delete(key);
        Ok(())
    }

    async fn get_pod(&self, key: &PodKey) -> Result<Pod> {
        self.registry.get(key)
    }

    async fn get_pods(&self) -> Result<Vec<Pod>> {
        Ok(self.registry.list())
    }

    async fn get_pod_status(&self, key: &PodKey) -> Result<PodStatus> {
        self.registry.status(key)
    }

    async fn get_container_logs(
        &self,
        key: &PodKey,
        container: &str,
        opts: LogOptions,
    ) -> Result<LogStream> {
        debug!(pod = %key, container, ?opts, "returning empty log stream, backend keeps no logs");
        Ok(Box::new(tokio::io::empty()))
    }

    async fn run_in_container(
        &self,
        key: &PodKey,
        container: &str,
        command: Vec<String>,
        _attach: AttachStreams,
    ) -> Result<()> {
        info!(pod = %key, container, ?command, "exec accepted but not executed");
        Ok(())
    }

    fn capacity(&self) -> BTreeMap<String, Quantity> {
        node::capacity(&self.config)
    }

    fn node_conditions(&self) -> Vec<NodeCondition> {
        node::node_conditions()
    }

    fn node_addresses(&self) -> Vec<NodeAddress> {
        node::node_addresses()
    }

    fn node_daemon_endpoints(&self) -> NodeDaemonEndpoints {
        node::node_daemon_endpoints()
    }

    fn operating_system(&self) -> String {
        self.config.operating_system.clone()
    }
}
