//! Merge engine for mixstack.
//!
//! Reconciles a native stack snapshot, in which every invocation of the
//! script interpreter shows up as a trampoline frame, with the script
//! runtime's own stack snapshot. Each trampoline (a [`Marker`] match) is
//! replaced by the next script frame in order, yielding one typed stack.
//!
//! # Key Types
//!
//! - [`MergeEngine`] -- Explicit, immutable engine handle holding the markers
//! - [`MergeReport`] -- Merged frames plus substitution/shortage/surplus counts
//! - [`Marker`] -- Exact trampoline function name
//! - [`MergeConfig`] -- TOML-loadable engine configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod marker;

pub use config::MergeConfig;
pub use engine::{merge, MergeEngine, MergeReport};
pub use error::{ConfigError, ConfigResult};
pub use marker::{Marker, DEFAULT_MARKER};
