use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use workflow_bundler::prelude::*;

/// Scripted bundler: succeeds with a marker bundle unless the entry path
/// contains a fragment registered as failing.
struct ScriptedBundler {
    failures: Vec<(String, String)>,
    calls: Mutex<Vec<PathBuf>>,
}

impl ScriptedBundler {
    fn new() -> Self {
        Self {
            failures: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn fail_for(mut self, path_fragment: &str, message: &str) -> Self {
        self.failures
            .push((path_fragment.to_string(), message.to_string()));
        self
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WorkflowBundler for ScriptedBundler {
    async fn bundle(&self, options: &BundleOptions) -> Result<WorkflowBundle, BundleError> {
        self.calls
            .lock()
            .unwrap()
            .push(options.workflows_path.clone());
        let path = options.workflows_path.to_string_lossy();
        for (fragment, message) in &self.failures {
            if path.contains(fragment.as_str()) {
                return Err(BundleError::Bundler {
                    message: message.clone(),
                });
            }
        }
        Ok(WorkflowBundle::new(format!("// workflow bundle: {path}\n")))
    }
}

struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

impl CapturingLogger {
    fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Logger for CapturingLogger {
    fn info(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("info: {message}"));
    }

    fn error(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("error: {message}"));
    }
}

/// In-memory stand-in for a host build tool with two lifecycle triggers.
struct TestHost {
    context: PathBuf,
    logger: Arc<CapturingLogger>,
    before_run: Vec<Arc<dyn LifecycleHook>>,
    watch_run: Vec<Arc<dyn LifecycleHook>>,
}

impl TestHost {
    fn new(context: impl Into<PathBuf>) -> Self {
        Self {
            context: context.into(),
            logger: Arc::new(CapturingLogger::new()),
            before_run: Vec::new(),
            watch_run: Vec::new(),
        }
    }

    /// Fires the initial-build trigger, failing the build on a hook error.
    async fn build(&self) -> Result<(), BundleError> {
        for hook in &self.before_run {
            hook.run().await?;
        }
        Ok(())
    }

    /// Fires the incremental-rebuild trigger.
    async fn rebuild(&self) -> Result<(), BundleError> {
        for hook in &self.watch_run {
            hook.run().await?;
        }
        Ok(())
    }
}

impl BuildHost for TestHost {
    fn context_dir(&self) -> &Path {
        &self.context
    }

    fn logger(&self) -> Arc<dyn Logger> {
        self.logger.clone()
    }

    fn on_before_run(&mut self, hook: Arc<dyn LifecycleHook>) {
        self.before_run.push(hook);
    }

    fn on_watch_run(&mut self, hook: Arc<dyn LifecycleHook>) {
        self.watch_run.push(hook);
    }
}

fn two_entry_options() -> PluginOptions {
    PluginOptions::new("./dist")
        .add_workflow(WorkflowBundleConfig::new("./src/a.ts"))
        .add_workflow(WorkflowBundleConfig::new("./src/b.ts").with_name("custom"))
}

#[tokio::test]
async fn test_full_build_writes_expected_outputs() {
    let dir = TempDir::new().unwrap();
    let bundler = Arc::new(ScriptedBundler::new());
    let plugin = WorkflowsPlugin::new(two_entry_options(), bundler.clone());
    let mut host = TestHost::new(dir.path());
    plugin.apply(&mut host);

    host.build().await.unwrap();

    assert_eq!(bundler.call_count(), 2);
    assert!(dir.path().join("dist/a.js").is_file());
    assert!(dir.path().join("dist/custom.js").is_file());

    let lines = host.logger.lines();
    assert_eq!(lines.first().map(String::as_str), Some("info: Bundling workflows..."));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("info: ✓ Successfully bundled 2 workflow(s)")
    );
}

#[tokio::test]
async fn test_partial_failure_fails_build_but_writes_survivors() {
    let dir = TempDir::new().unwrap();
    let bundler = Arc::new(ScriptedBundler::new().fail_for("a.ts", "syntax error"));
    let plugin = WorkflowsPlugin::new(two_entry_options(), bundler.clone());
    let mut host = TestHost::new(dir.path());
    plugin.apply(&mut host);

    let error = host.build().await.unwrap_err();

    // Both entries ran to completion; the surviving bundle is on disk.
    assert_eq!(bundler.call_count(), 2);
    assert!(dir.path().join("dist/custom.js").is_file());
    assert!(!dir.path().join("dist/a.js").exists());

    let message = error.to_string();
    assert!(message.contains("1/2 succeeded"));
    assert!(message.contains("syntax error"));
}

#[tokio::test]
async fn test_watch_trigger_rebundles_all_entries() {
    let dir = TempDir::new().unwrap();
    let bundler = Arc::new(ScriptedBundler::new());
    let plugin = WorkflowsPlugin::new(two_entry_options(), bundler.clone());
    let mut host = TestHost::new(dir.path());
    plugin.apply(&mut host);

    host.build().await.unwrap();
    host.rebuild().await.unwrap();
    host.rebuild().await.unwrap();

    // 2 entries x 3 triggers: every trigger re-bundles everything.
    assert_eq!(bundler.call_count(), 6);
}

#[tokio::test]
async fn test_explicit_output_path_is_used_verbatim() {
    let dir = TempDir::new().unwrap();
    let options = PluginOptions::new("./dist").add_workflow(
        WorkflowBundleConfig::new("./src/a.ts")
            .with_name("ignored")
            .with_output_path("./build/custom/location/workflows.js"),
    );
    let bundler = Arc::new(ScriptedBundler::new());
    let plugin = WorkflowsPlugin::new(options, bundler);
    let mut host = TestHost::new(dir.path());
    plugin.apply(&mut host);

    host.build().await.unwrap();

    assert!(dir
        .path()
        .join("build/custom/location/workflows.js")
        .is_file());
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn test_run_with_tracing_logger() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = TempDir::new().unwrap();
    let options =
        PluginOptions::new("./dist").add_workflow(WorkflowBundleConfig::new("./src/a.ts"));
    let orchestrator = Orchestrator::new(options, Arc::new(ScriptedBundler::new()));

    orchestrator
        .bundle_workflows(dir.path(), &TracingLogger)
        .await
        .unwrap();

    assert!(dir.path().join("dist/a.js").is_file());
}

#[tokio::test]
async fn test_rebuild_after_failure_is_a_fresh_full_run() {
    let dir = TempDir::new().unwrap();
    let bundler = Arc::new(ScriptedBundler::new().fail_for("a.ts", "syntax error"));
    let plugin = WorkflowsPlugin::new(two_entry_options(), bundler.clone());
    let mut host = TestHost::new(dir.path());
    plugin.apply(&mut host);

    assert!(host.build().await.is_err());

    // The plugin itself never retries; the next watch trigger simply runs
    // everything again and fails the same way.
    assert!(host.rebuild().await.is_err());
    assert_eq!(bundler.call_count(), 4);
}
