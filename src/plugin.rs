use crate::bundler::WorkflowBundler;
use crate::config::PluginOptions;
use crate::error::BundleError;
use crate::host::{BuildHost, LifecycleHook, Logger};
use crate::orchestrator::Orchestrator;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// The plugin registration unit.
///
/// Constructed once from [`PluginOptions`] and a bundler, then applied to
/// a host build tool. Applying binds a single run closure, with the host's
/// context directory and logging sink captured at registration time, to
/// both lifecycle triggers: the one before an initial build and the one
/// before each incremental rebuild.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use workflow_bundler::prelude::*;
///
/// struct MyBundler;
///
/// #[async_trait]
/// impl WorkflowBundler for MyBundler {
///     async fn bundle(&self, options: &BundleOptions) -> Result<WorkflowBundle, BundleError> {
///         Ok(WorkflowBundle::new("// ...".to_string()))
///     }
/// }
///
/// fn register(host: &mut dyn BuildHost) {
///     let options = PluginOptions::new("./dist/workflows")
///         .add_workflow(WorkflowBundleConfig::new("./src/workflows.ts"));
///     let plugin = WorkflowsPlugin::new(options, Arc::new(MyBundler));
///     plugin.apply(host);
/// }
/// ```
pub struct WorkflowsPlugin {
    orchestrator: Arc<Orchestrator>,
}

impl fmt::Debug for WorkflowsPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowsPlugin")
            .field("options", self.orchestrator.options())
            .finish()
    }
}

impl WorkflowsPlugin {
    /// Creates a plugin instance over immutable configuration.
    pub fn new(options: PluginOptions, bundler: Arc<dyn WorkflowBundler>) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(options, bundler)),
        }
    }

    /// Registers the bundling run on both of the host's lifecycle
    /// triggers.
    ///
    /// The same hook instance is bound to both triggers, so an initial
    /// build and every watch rebuild each run all configured entries in
    /// full.
    pub fn apply(&self, host: &mut dyn BuildHost) {
        let hook = Arc::new(BoundRun {
            orchestrator: self.orchestrator.clone(),
            context: host.context_dir().to_path_buf(),
            logger: host.logger(),
        });
        host.on_before_run(hook.clone());
        host.on_watch_run(hook);
    }
}

/// A bundling run bound to one host: context and logger are captured at
/// registration, injected into the orchestrator at call time.
struct BoundRun {
    orchestrator: Arc<Orchestrator>,
    context: PathBuf,
    logger: Arc<dyn Logger>,
}

#[async_trait]
impl LifecycleHook for BoundRun {
    async fn run(&self) -> Result<(), BundleError> {
        self.orchestrator
            .bundle_workflows(&self.context, self.logger.as_ref())
            .await
    }
}
