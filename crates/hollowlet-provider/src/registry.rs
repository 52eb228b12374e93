//! The authoritative pod table for this virtual node.

use k8s_openapi::api::core::v1::{Pod, PodStatus};
use parking_lot::RwLock;
use tracing::{debug, info};

use hollowlet_core::PodKey;

use crate::status::synthesize_status;
use crate::{ProviderError, Result};

/// Extract the `(namespace, name)` identity from a pod manifest.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidPod`] if the manifest is missing
/// either metadata field.
pub fn pod_key(pod: &Pod) -> Result<PodKey> {
    let namespace = pod
        .metadata
        .namespace
        .as_deref()
        .ok_or_else(|| ProviderError::InvalidPod("metadata.namespace is missing".to_string()))?;
    let name = pod
        .metadata
        .name
        .as_deref()
        .ok_or_else(|| ProviderError::InvalidPod("metadata.name is missing".to_string()))?;
    Ok(PodKey::new(namespace, name))
}

/// The authoritative table of pods registered on this node.
///
/// The registry exclusively owns its records; queries hand out clones,
/// so callers can never corrupt registry state through a returned
/// value. Every operation takes the table lock, which keeps create's
/// existence check atomic with its insertion and rules out the
/// check-then-act race between concurrent creates for one identity.
///
/// Records are kept in insertion order and looked up by linear scan —
/// a node holds at most a few dozen pods.
#[derive(Debug, Default)]
pub struct PodRegistry {
    pods: RwLock<Vec<Pod>>,
}

impl PodRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pod, synthesizing its observed status.
    ///
    /// The record becomes visible to [`get`](Self::get) and
    /// [`list`](Self::list) fully formed; no partial state is ever
    /// observable.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AlreadyExists`] if a live record with
    /// the same identity is registered, or
    /// [`ProviderError::InvalidPod`] if the manifest has no identity.
    pub fn create(&self, mut pod: Pod) -> Result<()> {
        let key = pod_key(&pod)?;

        let mut pods = self.pods.write();
        if pods.iter().any(|existing| matches_key(existing, &key)) {
            return Err(ProviderError::AlreadyExists(key));
        }

        pod.status = Some(synthesize_status(&pod));
        pods.push(pod);

        info!(pod = %key, "registered pod");
        Ok(())
    }

    /// Accept an updated spec without applying it.
    ///
    /// The execution backend does not support in-place spec changes,
    /// so update is an explicit no-op: it always succeeds, never
    /// mutates the table, and never checks existence. Callers must not
    /// infer that the new spec took effect.
    #[allow(clippy::unused_self)]
    pub fn update(&self, pod: &Pod) {
        debug!(pod = ?pod.metadata.name, "update ignored, backend has no in-place updates");
    }

    /// Remove the pod with the given identity, if present.
    ///
    /// Delete is idempotent: removing an absent identity is not an
    /// error. Returns whether a record was actually removed.
    pub fn delete(&self, key: &PodKey) -> bool {
        let mut pods = self.pods.write();
        if let Some(index) = pods.iter().position(|pod| matches_key(pod, key)) {
            pods.remove(index);
            info!(pod = %key, "removed pod");
            true
        } else {
            debug!(pod = %key, "delete for unknown pod, nothing to do");
            false
        }
    }

    /// Get a clone of the pod with the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if no live record matches.
    pub fn get(&self, key: &PodKey) -> Result<Pod> {
        self.pods
            .read()
            .iter()
            .find(|pod| matches_key(pod, key))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(key.clone()))
    }

    /// Get clones of all live records, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Pod> {
        self.pods.read().clone()
    }

    /// Get the observed status of the pod with the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] under the same condition as
    /// [`get`](Self::get).
    pub fn status(&self, key: &PodKey) -> Result<PodStatus> {
        self.get(key).map(|pod| pod.status.unwrap_or_default())
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pods.read().len()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pods.read().is_empty()
    }
}

fn matches_key(pod: &Pod, key: &PodKey) -> bool {
    pod.metadata.namespace.as_deref() == Some(key.namespace())
        && pod.metadata.name.as_deref() == Some(key.name())
}
