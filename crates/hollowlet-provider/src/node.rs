//! Node status reporting.
//!
//! Everything here is stateless and read-only: capacity is a static
//! advertisement taken from configuration (it does not shrink as pods
//! are registered), and the condition list is a fixed healthy set
//! rather than the output of a real probe. Only the condition
//! timestamps vary between calls.

use std::collections::BTreeMap;

use chrono::Utc;
use k8s_openapi::api::core::v1::{NodeAddress, NodeCondition, NodeDaemonEndpoints};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

use crate::config::NodeConfig;

/// Build the resource capacity this node advertises.
#[must_use]
pub fn capacity(config: &NodeConfig) -> BTreeMap<String, Quantity> {
    let mut resources = BTreeMap::new();
    resources.insert("cpu".to_string(), Quantity(config.cpu.clone()));
    resources.insert("memory".to_string(), Quantity(config.memory.clone()));
    resources.insert("pods".to_string(), Quantity(config.max_pods.clone()));
    resources
}

/// Build the fixed node condition list.
///
/// Orchestrators pattern-match on these exact type/reason/message
/// strings. Heartbeat and transition timestamps are set to the time of
/// the call.
#[must_use]
pub fn node_conditions() -> Vec<NodeCondition> {
    let now = Time(Utc::now());

    vec![
        condition("Ready", "True", "KubeletReady", "kubelet is ready.", &now),
        condition(
            "OutOfDisk",
            "False",
            "KubeletHasSufficientDisk",
            "kubelet has sufficient disk space available",
            &now,
        ),
        condition(
            "MemoryPressure",
            "False",
            "KubeletHasSufficientMemory",
            "kubelet has sufficient memory available",
            &now,
        ),
        condition(
            "DiskPressure",
            "False",
            "KubeletHasNoDiskPressure",
            "kubelet has no disk pressure",
            &now,
        ),
        condition(
            "NetworkUnavailable",
            "False",
            "RouteCreated",
            "RouteController created a route",
            &now,
        ),
    ]
}

/// Node addresses. Unimplemented by design: the node advertises none.
#[must_use]
pub fn node_addresses() -> Vec<NodeAddress> {
    Vec::new()
}

/// Daemon endpoints. Unimplemented by design: zero-valued.
#[must_use]
pub fn node_daemon_endpoints() -> NodeDaemonEndpoints {
    NodeDaemonEndpoints::default()
}

fn condition(type_: &str, status: &str, reason: &str, message: &str, now: &Time) -> NodeCondition {
    NodeCondition {
        type_: type_.to_string(),
        status: status.to_string(),
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        last_heartbeat_time: Some(now.clone()),
        last_transition_time: Some(now.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_from_config() {
        let resources = capacity(&NodeConfig::default());
        assert_eq!(resources.get("cpu"), Some(&Quantity("20".to_string())));
        assert_eq!(resources.get("memory"), Some(&Quantity("100Gi".to_string())));
        assert_eq!(resources.get("pods"), Some(&Quantity("20".to_string())));
        assert_eq!(resources.len(), 3);
    }

    #[test]
    fn capacity_is_pure() {
        let config = NodeConfig::default();
        assert_eq!(capacity(&config), capacity(&config));
    }

    #[test]
    fn conditions_are_the_fixed_healthy_set() {
        let conditions = node_conditions();
        assert_eq!(conditions.len(), 5);

        let summary: Vec<_> = conditions
            .iter()
            .map(|c| (c.type_.as_str(), c.status.as_str(), c.reason.as_deref().unwrap()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Ready", "True", "KubeletReady"),
                ("OutOfDisk", "False", "KubeletHasSufficientDisk"),
                ("MemoryPressure", "False", "KubeletHasSufficientMemory"),
                ("DiskPressure", "False", "KubeletHasNoDiskPressure"),
                ("NetworkUnavailable", "False", "RouteCreated"),
            ]
        );

        for c in &conditions {
            assert!(c.last_heartbeat_time.is_some());
            assert!(c.last_transition_time.is_some());
        }
    }

    #[test]
    fn addresses_and_endpoints_are_empty() {
        assert!(node_addresses().is_empty());
        assert_eq!(node_daemon_endpoints(), NodeDaemonEndpoints::default());
    }
}
