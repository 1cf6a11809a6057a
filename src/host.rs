use crate::error::BundleError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// The logging sink supplied by the host build tool.
///
/// The plugin only ever needs two levels: informational lines for starts
/// and successes, error lines for individual failures and the final
/// summary. The sink reaches a run explicitly at call time, so hosts can
/// hand out a fresh logger per build if they want to.
pub trait Logger: Send + Sync {
    /// Emits an informational line.
    fn info(&self, message: &str);
    /// Emits an error line.
    fn error(&self, message: &str);
}

/// Default [`Logger`] that forwards lines to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// An async callback bound to a host lifecycle trigger.
///
/// The host must await the hook before proceeding with its build and treat
/// a returned error as a failed build.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    /// Runs the hook to completion.
    async fn run(&self) -> Result<(), BundleError>;
}

/// The host build tool's extensibility surface.
///
/// A host exposes the base directory for resolving relative configuration
/// paths, a logging sink, and two registration points: one fired before an
/// initial build and one before each incremental rebuild. The plugin binds
/// the same hook to both, so every watch trigger re-bundles everything.
pub trait BuildHost {
    /// The base directory against which all relative paths are resolved.
    fn context_dir(&self) -> &Path;

    /// The host's logging sink.
    fn logger(&self) -> Arc<dyn Logger>;

    /// Registers a hook fired before the initial build.
    fn on_before_run(&mut self, hook: Arc<dyn LifecycleHook>);

    /// Registers a hook fired before each incremental rebuild.
    fn on_watch_run(&mut self, hook: Arc<dyn LifecycleHook>);
}
