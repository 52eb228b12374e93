//! Node configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the virtual node.
///
/// Capacity figures are static advertisements: they describe the
/// ceiling this node reports to the orchestrator and are not derived
/// from (or reduced by) the pods actually registered. Quantities are
/// kept as Kubernetes quantity strings (`20`, `100Gi`) and passed
/// through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Name this node registers as.
    pub node_name: String,
    /// Operating system family this provider supports.
    pub operating_system: String,
    /// Advertised CPU capacity.
    pub cpu: String,
    /// Advertised memory capacity.
    pub memory: String,
    /// Advertised maximum pod count.
    pub max_pods: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_name: "hollowlet".to_string(),
            operating_system: "linux".to_string(),
            cpu: "20".to_string(),
            memory: "100Gi".to_string(),
            max_pods: "20".to_string(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// Supported environment variables:
    /// - `HOLLOWLET_NODE_NAME`: name this node registers as
    /// - `HOLLOWLET_OS`: operating system family
    /// - `HOLLOWLET_CPU`: advertised CPU capacity
    /// - `HOLLOWLET_MEMORY`: advertised memory capacity
    /// - `HOLLOWLET_MAX_PODS`: advertised maximum pod count
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("HOLLOWLET_NODE_NAME") {
            config.node_name = val;
        }
        if let Ok(val) = std::env::var("HOLLOWLET_OS") {
            config.operating_system = val;
        }
        if let Ok(val) = std::env::var("HOLLOWLET_CPU") {
            config.cpu = val;
        }
        if let Ok(val) = std::env::var("HOLLOWLET_MEMORY") {
            config.memory = val;
        }
        if let Ok(val) = std::env::var("HOLLOWLET_MAX_PODS") {
            config.max_pods = val;
        }

        config
    }
}
