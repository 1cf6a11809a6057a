use crate::error::BundleError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// The effective options handed to the external bundler for one entry.
///
/// `workflows_path` is always the resolved absolute entry path and is set
/// by the orchestrator; it cannot be overridden from either options layer.
/// Everything else lives in `extra`, built by a shallow, precedence-ordered
/// merge of the global layer and the per-entry layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleOptions {
    /// Resolved absolute path to the workflow entry module.
    pub workflows_path: PathBuf,
    /// Bundler-specific options, merged shallowly (entry over global).
    pub extra: Map<String, Value>,
}

impl BundleOptions {
    /// Creates options with no extra keys.
    pub fn new(workflows_path: impl Into<PathBuf>) -> Self {
        Self {
            workflows_path: workflows_path.into(),
            extra: Map::new(),
        }
    }

    /// Builds the effective options for one entry.
    ///
    /// The merge is shallow: keys in `entry` fully replace the same keys
    /// in `global`; nothing is merged recursively. A `workflows_path` key
    /// smuggled into either layer is discarded so the resolved path always
    /// wins.
    pub fn merged(
        workflows_path: PathBuf,
        global: &Map<String, Value>,
        entry: &Map<String, Value>,
    ) -> Self {
        let mut extra = global.clone();
        for (key, value) in entry {
            extra.insert(key.clone(), value.clone());
        }
        extra.remove("workflows_path");
        Self {
            workflows_path,
            extra,
        }
    }

    /// Looks up an extra option by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// A finished bundle produced by the external bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowBundle {
    /// The bundle contents, written verbatim to the output file.
    pub code: String,
}

impl WorkflowBundle {
    /// Creates a bundle from its code text.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// The external workflow-bundling routine.
///
/// The orchestrator treats implementations as an opaque black box: it
/// passes the effective [`BundleOptions`] and writes back whatever `code`
/// comes out. Any error is captured verbatim as that entry's failure
/// message and never aborts sibling entries.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use workflow_bundler::{BundleError, BundleOptions, WorkflowBundle, WorkflowBundler};
///
/// struct EchoBundler;
///
/// #[async_trait]
/// impl WorkflowBundler for EchoBundler {
///     async fn bundle(&self, options: &BundleOptions) -> Result<WorkflowBundle, BundleError> {
///         Ok(WorkflowBundle::new(format!(
///             "// bundled from {}",
///             options.workflows_path.display()
///         )))
///     }
/// }
/// ```
#[async_trait]
pub trait WorkflowBundler: Send + Sync {
    /// Bundles one workflow entry module into self-contained code.
    async fn bundle(&self, options: &BundleOptions) -> Result<WorkflowBundle, BundleError>;
}
