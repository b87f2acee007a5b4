use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::fetch::SpecFetcher;
use crate::source::SpecSource;

/// Configuration for one sync batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub sources: Vec<SpecSource>,
    pub target_directory: PathBuf,
    /// Interval between runs for callers that re-trigger syncs; inert
    /// data for a single batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_interval_secs: Option<u64>,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// What to do when two sources share a `spec_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Report the clash and sync every occurrence; the later source
    /// overwrites the earlier one's output file.
    #[default]
    Warn,
    /// Report the clash and fail occurrences beyond the first without
    /// fetching them.
    Reject,
}

/// Outcome of one source's attempt.
///
/// `filename` is derived before any I/O, so failures stay attributable to
/// the file they would have produced.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One batch's results plus side-channel diagnostics.
#[derive(Debug)]
pub struct SyncReport {
    /// One entry per configured source, in input order.
    pub results: Vec<SyncResult>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Errors that abort a whole batch before any source is attempted.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to create target directory {}: {source}", path.display())]
    TargetDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Synchronizes configured spec sources into a target directory.
pub struct SyncManager {
    fetcher: Box<dyn SpecFetcher>,
}

impl SyncManager {
    pub fn new(fetcher: Box<dyn SpecFetcher>) -> Self {
        Self { fetcher }
    }

    /// Run one batch, strictly sequentially.
    ///
    /// Every per-source failure is converted into that source's failed
    /// result; the remaining sources still run. The only error that
    /// escapes is an unusable target directory, which fails the batch as
    /// a whole.
    pub async fn sync(&self, config: &SyncConfig) -> Result<SyncReport, SyncError> {
        std::fs::create_dir_all(&config.target_directory).map_err(|source| {
            SyncError::TargetDirectory {
                path: config.target_directory.clone(),
                source,
            }
        })?;

        let (diagnostics, rejected) = scan_duplicates(&config.sources, config.duplicate_policy);

        let mut results = Vec::with_capacity(config.sources.len());

        for (index, source) in config.sources.iter().enumerate() {
            let filename = source.output_filename();

            if let Some(first_index) = rejected.get(&index) {
                results.push(SyncResult {
                    success: false,
                    timestamp: Utc::now(),
                    filename,
                    error: Some(format!(
                        "duplicate spec_id \"{}\" already claimed by source {first_index}",
                        source.spec_id()
                    )),
                });
                continue;
            }

            let target_path = config.target_directory.join(&filename);

            results.push(match self.fetcher.fetch(source, &target_path).await {
                Ok(()) => SyncResult {
                    success: true,
                    timestamp: Utc::now(),
                    filename,
                    error: None,
                },
                Err(err) => SyncResult {
                    success: false,
                    timestamp: Utc::now(),
                    filename,
                    error: Some(err.to_string()),
                },
            });
        }

        Ok(SyncReport {
            results,
            diagnostics,
        })
    }
}

/// Flag every `spec_id` occurrence beyond its first. Under `Reject` the
/// flagged indices are also withheld from the fetch loop.
fn scan_duplicates(
    sources: &[SpecSource],
    policy: DuplicatePolicy,
) -> (Vec<Diagnostic>, HashMap<usize, usize>) {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut diagnostics = Vec::new();
    let mut rejected = HashMap::new();

    for (index, source) in sources.iter().enumerate() {
        match first_seen.get(source.spec_id()) {
            Some(&first_index) => {
                diagnostics.push(Diagnostic::DuplicateSpecId {
                    spec_id: source.spec_id().to_owned(),
                    first_index,
                    index,
                });
                if policy == DuplicatePolicy::Reject {
                    rejected.insert(index, first_index);
                }
            }
            None => {
                first_seen.insert(source.spec_id(), index);
            }
        }
    }

    (diagnostics, rejected)
}
