//! End-to-end contract tests for the provider, driven through a
//! `dyn Provider` the way a node agent consumes it.

use std::collections::BTreeMap;
use std::sync::Arc;

use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tokio::io::AsyncReadExt;

use hollowlet_core::PodKey;
use hollowlet_provider::{
    AttachStreams, LogOptions, NodeConfig, NodeProvider, Provider, ProviderError,
    POD_IP_ANNOTATION,
};

fn provider() -> Arc<dyn Provider> {
    Arc::new(NodeProvider::new(NodeConfig::default()))
}

fn manifest(namespace: &str, name: &str, containers: &[&str]) -> Pod {
    Pod {
        metadata: ObjectMeta {
            namespace: Some(namespace.to_string()),
            name: Some(name.to_string()),
            ..ObjectMeta::default()
        },
        spec: Some(PodSpec {
            containers: containers
                .iter()
                .map(|c| Container {
                    name: (*c).to_string(),
                    ..Container::default()
                })
                .collect(),
            ..PodSpec::default()
        }),
        ..Pod::default()
    }
}

#[tokio::test]
async fn pod_lifecycle_end_to_end() {
    let provider = provider();
    let key = PodKey::new("default", "web");

    provider
        .create_pod(manifest("default", "web", &["nginx"]))
        .await
        .unwrap();

    // Immediately visible and running.
    let status = provider.get_pod_status(&key).await.unwrap();
    assert_eq!(status.phase.as_deref(), Some("Running"));

    let statuses = status.container_statuses.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].name, "nginx");
    assert!(statuses[0].ready);
    assert_eq!(statuses[0].restart_count, 0);

    // Gone after delete.
    provider.delete_pod(&key).await.unwrap();
    let err = provider.get_pod(&key).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound(_)));
}

#[tokio::test]
async fn identity_is_unique_across_operations() {
    let provider = provider();

    provider
        .create_pod(manifest("default", "web", &["nginx"]))
        .await
        .unwrap();

    let err = provider
        .create_pod(manifest("default", "web", &["other"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::AlreadyExists(_)));

    // Same name in another namespace is a distinct identity.
    provider
        .create_pod(manifest("staging", "web", &["nginx"]))
        .await
        .unwrap();

    let pods = provider.get_pods().await.unwrap();
    assert_eq!(pods.len(), 2);

    let matching = pods
        .iter()
        .filter(|p| {
            p.metadata.namespace.as_deref() == Some("default")
                && p.metadata.name.as_deref() == Some("web")
        })
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn update_leaves_the_original_record_in_place() {
    let provider = provider();
    let key = PodKey::new("default", "web");

    provider
        .create_pod(manifest("default", "web", &["nginx"]))
        .await
        .unwrap();

    provider
        .update_pod(manifest("default", "web", &["nginx", "sidecar"]))
        .await
        .unwrap();

    let status = provider.get_pod_status(&key).await.unwrap();
    let statuses = status.container_statuses.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].name, "nginx");

    // Updating a pod that was never created also succeeds.
    provider
        .update_pod(manifest("default", "never-created", &["x"]))
        .await
        .unwrap();
    assert!(provider
        .get_pod(&PodKey::new("default", "never-created"))
        .await
        .is_err());
}

#[tokio::test]
async fn delete_of_absent_pod_succeeds_and_changes_nothing() {
    let provider = provider();

    provider
        .create_pod(manifest("default", "web", &["nginx"]))
        .await
        .unwrap();

    provider
        .delete_pod(&PodKey::new("default", "missing"))
        .await
        .unwrap();

    assert_eq!(provider.get_pods().await.unwrap().len(), 1);
}

#[tokio::test]
async fn pod_ip_flows_from_annotation_to_status() {
    let provider = provider();

    let mut pod = manifest("default", "web", &["nginx"]);
    let mut annotations = BTreeMap::new();
    annotations.insert(POD_IP_ANNOTATION.to_string(), "10.0.0.42".to_string());
    pod.metadata.annotations = Some(annotations);

    provider.create_pod(pod).await.unwrap();

    let status = provider
        .get_pod_status(&PodKey::new("default", "web"))
        .await
        .unwrap();
    assert_eq!(status.pod_ip.as_deref(), Some("10.0.0.42"));
}

#[tokio::test]
async fn node_surface_ignores_pod_churn() {
    let provider = provider();

    let capacity_before = provider.capacity();
    let conditions_before = provider.node_conditions();

    for i in 0..5 {
        provider
            .create_pod(manifest("default", &format!("pod-{i}"), &["c"]))
            .await
            .unwrap();
    }
    provider
        .delete_pod(&PodKey::new("default", "pod-0"))
        .await
        .unwrap();

    let capacity_after = provider.capacity();
    let conditions_after = provider.node_conditions();

    assert_eq!(capacity_before, capacity_after);

    // Structural content is identical; only timestamps move.
    assert_eq!(conditions_before.len(), conditions_after.len());
    for (before, after) in conditions_before.iter().zip(&conditions_after) {
        assert_eq!(before.type_, after.type_);
        assert_eq!(before.status, after.status);
        assert_eq!(before.reason, after.reason);
        assert_eq!(before.message, after.message);
    }
}

#[tokio::test]
async fn stub_surface_has_no_failure_mode() {
    let provider = provider();
    let key = PodKey::new("default", "web");

    // Logs and exec are defined for absent pods too.
    let mut stream = provider
        .get_container_logs(&key, "nginx", LogOptions::default())
        .await
        .unwrap();
    let mut buf = Vec::new();
    assert_eq!(stream.read_to_end(&mut buf).await.unwrap(), 0);

    provider
        .run_in_container(&key, "nginx", vec!["id".to_string()], AttachStreams::default())
        .await
        .unwrap();
}
