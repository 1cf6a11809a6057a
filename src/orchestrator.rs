//! The fan-out/fan-in run loop over configured workflow entries.

use crate::bundler::{BundleOptions, WorkflowBundler};
use crate::config::{resolve, PluginOptions, WorkflowBundleConfig};
use crate::error::BundleError;
use crate::host::Logger;
use futures::future::join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs every configured workflow entry through the external bundler and
/// writes the results.
///
/// All entries are dispatched concurrently at the start of a run with no
/// concurrency limit; the run joins on all of them before deciding the
/// outcome, so one entry's failure never cancels or blocks its siblings.
/// A run is never retried: the host re-invokes on the next build or watch
/// cycle, and every invocation re-bundles every entry.
pub struct Orchestrator {
    options: PluginOptions,
    bundler: Arc<dyn WorkflowBundler>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator over the given configuration and bundler.
    pub fn new(options: PluginOptions, bundler: Arc<dyn WorkflowBundler>) -> Self {
        Self { options, bundler }
    }

    /// The configuration this orchestrator runs.
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Bundles every configured entry, concurrently, and reports once.
    ///
    /// Resolves with `Ok(())` only when every entry succeeded. Otherwise
    /// returns a single [`BundleError::Aggregate`] listing how many
    /// entries succeeded out of the total and every failure message, after
    /// all entries have finished.
    pub async fn bundle_workflows(
        &self,
        context: &Path,
        logger: &dyn Logger,
    ) -> Result<(), BundleError> {
        logger.info("Bundling workflows...");

        let runs = self
            .options
            .workflows
            .iter()
            .map(|workflow| self.bundle_workflow(context, logger, workflow));
        let results = join_all(runs).await;

        let total = results.len();
        let failures: Vec<String> = results
            .into_iter()
            .filter_map(|result| result.err())
            .map(|error| error.to_string())
            .collect();

        if failures.is_empty() {
            logger.info(&format!("✓ Successfully bundled {total} workflow(s)"));
            return Ok(());
        }

        let succeeded = total - failures.len();
        logger.error(&format!(
            "Workflow bundling failed: {succeeded}/{total} succeeded"
        ));
        Err(BundleError::Aggregate {
            succeeded,
            total,
            failures,
        })
    }

    /// One entry's bundle-and-write step, with the failure contained.
    ///
    /// Any error from the bundler or the filesystem is logged and handed
    /// back as data for the aggregation step; it never crosses this
    /// boundary as an early return out of the join.
    async fn bundle_workflow(
        &self,
        context: &Path,
        logger: &dyn Logger,
        workflow: &WorkflowBundleConfig,
    ) -> Result<(), BundleError> {
        match self.try_bundle_workflow(context, workflow).await {
            Ok(written) => {
                logger.info(&format!(
                    "✓ Bundled: {} → {}",
                    workflow.workflows_path.display(),
                    written.display()
                ));
                Ok(())
            }
            Err(error) => {
                logger.error(&format!(
                    "✗ Failed to bundle: {}",
                    workflow.workflows_path.display()
                ));
                logger.error(&format!("  Error: {error}"));
                Err(error)
            }
        }
    }

    async fn try_bundle_workflow(
        &self,
        context: &Path,
        workflow: &WorkflowBundleConfig,
    ) -> Result<PathBuf, BundleError> {
        let workflows_path = resolve(context, &workflow.workflows_path);
        let options = BundleOptions::merged(
            workflows_path,
            &self.options.global_bundle_options,
            &workflow.bundle_options,
        );

        let bundle = self.bundler.bundle(&options).await?;

        let destination =
            workflow.resolved_output_path(context, &self.options.default_output_dir);
        if let Some(dir) = destination.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| BundleError::Write {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&destination, bundle.code.as_bytes())
            .await
            .map_err(|source| BundleError::Write {
                path: destination.clone(),
                source,
            })?;

        Ok(destination)
    }
}
