//! Commonly used types and traits

pub use crate::bundler::{BundleOptions, WorkflowBundle, WorkflowBundler};
pub use crate::config::{PluginOptions, WorkflowBundleConfig};
pub use crate::error::BundleError;
pub use crate::host::{BuildHost, LifecycleHook, Logger, TracingLogger};
pub use crate::orchestrator::Orchestrator;
pub use crate::plugin::WorkflowsPlugin;
