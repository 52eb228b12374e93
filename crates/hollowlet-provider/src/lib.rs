//! Virtual-node workload provider for hollowlet.
//!
//! This crate implements the provider side of an orchestrator's node
//! agent: the fixed set of pod lifecycle operations (create, update,
//! delete, query, status, logs, exec) plus the node capacity and
//! condition surface. The execution backend is a deliberate no-op —
//! accepted pods are reported as running without anything actually
//! being executed.
//!
//! The heart of the crate is the [`PodRegistry`], the authoritative
//! table of pods registered on this node. All lifecycle operations are
//! mediated by the registry, which enforces identity uniqueness and
//! synthesizes each pod's observed status atomically with its
//! insertion. The [`Provider`] trait is the seam a real execution
//! backend would re-implement; [`NodeProvider`] is the registry-backed
//! implementation shipped here.
//!
//! # Example
//!
//! ```no_run
//! use hollowlet_core::PodKey;
//! use hollowlet_provider::{NodeConfig, NodeProvider, Provider};
//! use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
//! use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
//!
//! # async fn example() -> hollowlet_provider::Result<()> {
//! let provider = NodeProvider::new(NodeConfig::default());
//!
//! let pod = Pod {
//!     metadata: ObjectMeta {
//!         namespace: Some("default".to_string()),
//!         name: Some("web".to_string()),
//!         ..ObjectMeta::default()
//!     },
//!     spec: Some(PodSpec {
//!         containers: vec![Container {
//!             name: "nginx".to_string(),
//!             ..Container::default()
//!         }],
//!         ..PodSpec::default()
//!     }),
//!     ..Pod::default()
//! };
//!
//! provider.create_pod(pod).await?;
//!
//! let status = provider
//!     .get_pod_status(&PodKey::new("default", "web"))
//!     .await?;
//! assert_eq!(status.phase.as_deref(), Some("Running"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod node;
pub mod provider;
pub mod registry;
pub mod status;

pub use config::NodeConfig;
pub use error::{ProviderError, Result};
pub use provider::{AttachStreams, LogOptions, LogStream, NodeProvider, Provider};
pub use registry::{pod_key, PodRegistry};
pub use status::POD_IP_ANNOTATION;
