//! Sequential extraction over a directory of workbooks

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::config::{ExtractConfig, FailurePolicy};
use crate::error::StructureIssue;
use crate::extract::extract_workbook;
use crate::scan::{WorkbookFile, scan_workbooks};
use crate::writer::RecordSink;

/// A workbook that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Non-fatal problem found in a processed workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIssue {
    pub path: PathBuf,
    pub issue: StructureIssue,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    pub issues: Vec<FileIssue>,
    pub column_rows: usize,
    pub dashboard_rows: usize,
    /// Set when the run stopped early under [`FailurePolicy::Abort`]
    pub aborted: bool,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.aborted
    }
}

/// Run error raised under [`FailurePolicy::Abort`] by the first failing file.
///
/// Carries the report of the work done up to that point.
#[derive(Debug, thiserror::Error)]
#[error("run aborted at {}: {}", .failure.path.display(), .failure.message)]
pub struct BatchAborted {
    pub failure: FileFailure,
    pub report: BatchReport,
}

/// Extract every workbook under `input_dir` into `sink`.
///
/// Files are processed one at a time in scan order and their rows are handed
/// to the sink as soon as each file is done. A file that fails is recorded in
/// the report and the run continues. Under [`FailurePolicy::Abort`] the run
/// stops there instead and returns [`BatchAborted`]. The sink is finished in
/// both cases. Sink write errors end the run with an error.
pub fn run_batch<S: RecordSink + ?Sized>(
    input_dir: &Path,
    sink: &mut S,
    config: &ExtractConfig,
) -> Result<BatchReport> {
    let encoding = config.encoding()?;
    let suffix = config.file_suffix();
    let files = scan_workbooks(input_dir, &suffix)?;

    let mut report = BatchReport::default();
    let mut abort_at = None;

    for entry in files {
        let outcome = match entry {
            Ok(file) => process_file(&file, encoding, sink, &mut report)?,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                Some(FileFailure {
                    path,
                    message: e.to_string(),
                })
            }
        };

        if let Some(failure) = outcome {
            if config.on_error == FailurePolicy::Abort {
                error!("Aborting at {}: {}", failure.path.display(), failure.message);
                report.aborted = true;
                report.failures.push(failure.clone());
                abort_at = Some(failure);
                break;
            }
            warn!("Skipping {}: {}", failure.path.display(), failure.message);
            report.failures.push(failure);
        }
    }

    // Rows of files done before an abort stay in the output
    sink.finish()?;

    if let Some(failure) = abort_at {
        return Err(BatchAborted { failure, report }.into());
    }

    info!(
        "Processed {} workbook(s): {} column row(s), {} dashboard row(s), {} failure(s)",
        report.processed.len(),
        report.column_rows,
        report.dashboard_rows,
        report.failures.len()
    );

    Ok(report)
}

/// Extract one file into the sink. Extraction failures are returned, not raised.
fn process_file<S: RecordSink + ?Sized>(
    file: &WorkbookFile,
    encoding: &'static Encoding,
    sink: &mut S,
    report: &mut BatchReport,
) -> Result<Option<FileFailure>> {
    debug!("Reading {}", file.path.display());

    let metadata = match extract_workbook(&file.path, encoding) {
        Ok(metadata) => metadata,
        Err(e) => {
            return Ok(Some(FileFailure {
                path: file.path.clone(),
                message: e.to_string(),
            }));
        }
    };

    for issue in metadata.issues {
        warn!("{}: {}", file.path.display(), issue);
        report.issues.push(FileIssue {
            path: file.path.clone(),
            issue,
        });
    }

    sink.write_columns(&file.folder_path, &metadata.columns)
        .with_context(|| format!("Failed to store rows of {}", file.path.display()))?;
    sink.write_dashboards(&file.folder_path, &metadata.dashboards)
        .with_context(|| format!("Failed to store rows of {}", file.path.display()))?;

    debug!(
        "{}: {} column row(s), {} dashboard row(s)",
        file.path.display(),
        metadata.columns.len(),
        metadata.dashboards.len()
    );

    report.column_rows += metadata.columns.len();
    report.dashboard_rows += metadata.dashboards.len();
    report.processed.push(file.path.clone());

    Ok(None)
}
