//! Core types for hollowlet.
//!
//! This crate provides the foundational identity type shared across the
//! hollowlet workspace:
//!
//! - **[`PodKey`]**: the `(namespace, name)` pair uniquely identifying a
//!   pod on a virtual node
//!
//! # Example
//!
//! ```
//! use hollowlet_core::PodKey;
//!
//! let key = PodKey::new("default", "web");
//! assert_eq!(key.to_string(), "default/web");
//!
//! // Parse a key back from its display form
//! let parsed: PodKey = "default/web".parse().unwrap();
//! assert_eq!(key, parsed);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod key;

pub use key::{KeyError, PodKey};
