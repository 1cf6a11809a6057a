use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Configuration for bundling a single workflow entry.
///
/// Each entry produces exactly one output artifact per run.
///
/// # Examples
///
/// ```
/// use workflow_bundler::WorkflowBundleConfig;
///
/// let entry = WorkflowBundleConfig::new("./src/workflows/index.ts");
/// assert_eq!(entry.default_name(), "index");
///
/// let named = WorkflowBundleConfig::new("./src/workflows.ts").with_name("my-workflows");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowBundleConfig {
    /// Path to the entry module with workflows, relative to the build
    /// context (or absolute).
    pub workflows_path: PathBuf,

    /// Name of the output file, without the `.js` extension.
    ///
    /// Defaults to the file stem of `workflows_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Full path to the output file.
    ///
    /// When set, `name` and the plugin's default output directory are
    /// ignored for this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Bundler options for this entry, layered over the plugin's global
    /// options. The merge is shallow: a key here fully replaces the same
    /// key in the global layer.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub bundle_options: Map<String, Value>,
}

impl WorkflowBundleConfig {
    /// Creates an entry for the given workflows path with everything else
    /// left to defaults.
    pub fn new(workflows_path: impl Into<PathBuf>) -> Self {
        Self {
            workflows_path: workflows_path.into(),
            name: None,
            output_path: None,
            bundle_options: Map::new(),
        }
    }

    /// Sets the output file name (without extension).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets an explicit output path, bypassing name composition.
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    /// Sets per-entry bundler options.
    pub fn with_bundle_options(mut self, bundle_options: Map<String, Value>) -> Self {
        self.bundle_options = bundle_options;
        self
    }

    /// Returns the default output name: the basename of `workflows_path`
    /// with its extension stripped.
    pub fn default_name(&self) -> String {
        self.workflows_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.workflows_path.to_string_lossy().into_owned())
    }

    /// Resolves where this entry's bundle is written.
    ///
    /// An explicit `output_path` wins and is resolved against the context
    /// directly. Otherwise the output is
    /// `<default_output_dir>/<name or default_name>.js`, resolved against
    /// the context. Deterministic: no filesystem access.
    pub fn resolved_output_path(&self, context: &Path, default_output_dir: &Path) -> PathBuf {
        match &self.output_path {
            Some(output_path) => resolve(context, output_path),
            None => {
                let name = self.name.clone().unwrap_or_else(|| self.default_name());
                resolve(context, &default_output_dir.join(format!("{name}.js")))
            }
        }
    }
}

/// Process-wide configuration for one plugin instance.
///
/// Set once at construction and never mutated; every run re-reads it in
/// full.
///
/// # Examples
///
/// ```
/// use workflow_bundler::{PluginOptions, WorkflowBundleConfig};
///
/// let options = PluginOptions::new("./dist/workflows")
///     .add_workflow(WorkflowBundleConfig::new("./src/workflows.ts"));
/// assert_eq!(options.workflows.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    /// Directory for output files when an entry has no explicit
    /// `output_path`.
    pub default_output_dir: PathBuf,

    /// The workflow entries to bundle. Order fixes log and report order,
    /// not execution order.
    #[serde(default)]
    pub workflows: Vec<WorkflowBundleConfig>,

    /// Bundler options applied to every entry, overridable per entry.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub global_bundle_options: Map<String, Value>,
}

impl PluginOptions {
    /// Creates options with the given default output directory and no
    /// workflows.
    pub fn new(default_output_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_output_dir: default_output_dir.into(),
            workflows: Vec::new(),
            global_bundle_options: Map::new(),
        }
    }

    /// Appends a workflow entry.
    pub fn add_workflow(mut self, workflow: WorkflowBundleConfig) -> Self {
        self.workflows.push(workflow);
        self
    }

    /// Sets the global bundler options layer.
    pub fn with_global_bundle_options(mut self, options: Map<String, Value>) -> Self {
        self.global_bundle_options = options;
        self
    }
}

/// Resolves `path` against `context`, leaving absolute paths untouched.
pub(crate) fn resolve(context: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        context.join(path)
    }
}
