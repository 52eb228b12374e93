//! Pod status synthesis.
//!
//! With no real execution backend, the observed status of an accepted
//! pod is derived entirely from its desired spec at creation time:
//! every declared container is reported running and ready, and the pod
//! is Running from the moment it enters the registry.

use chrono::Utc;
use k8s_openapi::api::core::v1::{
    ContainerState, ContainerStateRunning, ContainerStatus, Pod, PodCondition, PodStatus,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

/// Annotation the surrounding node agent uses to hand this provider a
/// pod IP. Consuming orchestrators match on this exact key.
pub const POD_IP_ANNOTATION: &str = "vk/PodIP";

/// Synthesize the observed status for a newly accepted pod.
///
/// The container-status list has exactly one entry per declared
/// container, in declaration order, all marked running and ready with
/// restart count zero and a shared start time. The pod IP is copied
/// verbatim from the [`POD_IP_ANNOTATION`] annotation — empty when
/// absent, never validated.
#[must_use]
pub fn synthesize_status(pod: &Pod) -> PodStatus {
    let now = Time(Utc::now());

    let pod_ip = pod
        .metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(POD_IP_ANNOTATION))
        .cloned()
        .unwrap_or_default();

    let containers = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.as_slice())
        .unwrap_or_default();

    let container_statuses = containers
        .iter()
        .map(|container| ContainerStatus {
            name: container.name.clone(),
            image: container.image.clone().unwrap_or_default(),
            ready: true,
            restart_count: 0,
            started: Some(true),
            state: Some(ContainerState {
                running: Some(ContainerStateRunning {
                    started_at: Some(now.clone()),
                }),
                ..ContainerState::default()
            }),
            ..ContainerStatus::default()
        })
        .collect();

    PodStatus {
        phase: Some("Running".to_string()),
        pod_ip: Some(pod_ip),
        conditions: Some(vec![PodCondition {
            type_: "Ready".to_string(),
            status: "True".to_string(),
            ..PodCondition::default()
        }]),
        container_statuses: Some(container_statuses),
        start_time: Some(now),
        ..PodStatus::default()
    }
}
