//! # Workflow Bundler
//!
//! A build-tool plugin that bundles workflow entry modules during a host
//! bundler's build and watch lifecycle.
//!
//! The actual bundling (parsing and transpiling workflow code into a
//! self-contained executable bundle) is performed by an external routine
//! behind the [`WorkflowBundler`] trait. This crate owns the glue around
//! it: path resolution, default-name derivation, layered option merging,
//! directory creation, file writing, a concurrent fan-out over all
//! configured entries, and aggregation of per-entry outcomes into a single
//! reported failure.
//!
//! ## Features
//!
//! - **Failure isolation**: one entry's failure never cancels or blocks
//!   its siblings; every failure is reported, not just the first
//! - **Async first**: built on `tokio` and `async-trait`; all entries run
//!   concurrently with a full join before reporting
//! - **Layered options**: shallow, precedence-ordered merge of global and
//!   per-entry bundler options, with the resolved entry path always
//!   winning
//! - **Host agnostic**: the host build tool is a trait ([`BuildHost`])
//!   exposing a context directory, a logging sink, and two lifecycle
//!   triggers
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use workflow_bundler::prelude::*;
//!
//! struct MyBundler;
//!
//! #[async_trait]
//! impl WorkflowBundler for MyBundler {
//!     async fn bundle(&self, options: &BundleOptions) -> Result<WorkflowBundle, BundleError> {
//!         // Call into your real bundling routine here.
//!         Ok(WorkflowBundle::new(format!(
//!             "// bundled {}",
//!             options.workflows_path.display()
//!         )))
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), BundleError> {
//! let options = PluginOptions::new("./dist/workflows")
//!     .add_workflow(WorkflowBundleConfig::new("./src/workflows/index.ts"))
//!     .add_workflow(WorkflowBundleConfig::new("./src/billing.ts").with_name("billing"));
//!
//! // Either register on a host...
//! let _plugin = WorkflowsPlugin::new(options.clone(), Arc::new(MyBundler));
//!
//! // ...or drive a run directly.
//! let orchestrator = Orchestrator::new(options, Arc::new(MyBundler));
//! orchestrator
//!     .bundle_workflows("/project".as_ref(), &TracingLogger)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A run returns `Ok(())` only when every entry succeeded. Otherwise it
//! returns a single [`BundleError::Aggregate`] whose message reports how
//! many entries succeeded out of the total and lists every failure, one
//! per line:
//!
//! ```text
//! workflow bundling failed: 1/2 succeeded; failed to bundle 1 workflow(s):
//!   - syntax error
//! ```

mod bundler;
mod config;
mod error;
mod host;
mod orchestrator;
mod plugin;

pub mod prelude;

pub use bundler::{BundleOptions, WorkflowBundle, WorkflowBundler};
pub use config::{PluginOptions, WorkflowBundleConfig};
pub use error::BundleError;
pub use host::{BuildHost, LifecycleHook, Logger, TracingLogger};
pub use orchestrator::Orchestrator;
pub use plugin::WorkflowsPlugin;
