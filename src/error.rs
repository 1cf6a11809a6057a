use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while bundling workflows.
///
/// Per-entry failures (`Bundler`, `Write`) are collected while sibling
/// entries keep running; a run only ever surfaces the `Aggregate` variant,
/// once, after every entry has finished.
///
/// # Non-Exhaustive
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code. When matching
/// on this error, always include a wildcard pattern.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BundleError {
    /// The external bundler rejected a workflow entry.
    ///
    /// The message is captured verbatim from the bundler; it becomes one
    /// line of the aggregate report.
    #[error("{message}")]
    Bundler {
        /// What the bundler reported
        message: String,
    },

    /// Creating the output directory or writing the bundle failed.
    ///
    /// Treated exactly like a bundler failure at the per-entry boundary:
    /// it contributes to the aggregate instead of aborting the run.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// The path that could not be created or written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// One or more entries failed after a full run.
    ///
    /// This is the only variant a run returns to the host. Its message is
    /// the authoritative report: how many entries succeeded out of the
    /// total, and every individual failure message, one per line.
    #[error(
        "workflow bundling failed: {succeeded}/{total} succeeded; failed to bundle {} workflow(s):\n  - {}",
        .failures.len(),
        .failures.join("\n  - ")
    )]
    Aggregate {
        /// How many entries completed successfully
        succeeded: usize,
        /// How many entries were configured
        total: usize,
        /// The failure message of every entry that did not succeed
        failures: Vec<String>,
    },
}
