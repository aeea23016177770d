//! Error types for workbook loading and extraction

use std::path::PathBuf;
use thiserror::Error;

/// Failure to process a single workbook file
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened or read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file bytes are not valid in the requested encoding
    #[error("{} is not valid {encoding} text", .path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    /// The markup could not be parsed at all
    #[error("malformed XML at byte {position}: {source}")]
    Parse {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document parsed but lacks a required part
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// A required part of the workbook document is missing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("document has no <{element}> element")]
    MissingElement { element: &'static str },

    /// Dashboard windows are counted from 1 in document order
    #[error("dashboard window #{index} has no name attribute")]
    UnnamedDashboard { index: usize },
}

/// A malformed part of a worksheet that was skipped without failing the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureIssue {
    /// The worksheet has no table/view nesting
    MissingView { worksheet: String },
    /// A datasource-dependencies block has no datasource attribute
    MissingDatasource { worksheet: String },
}

impl std::fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureIssue::MissingView { worksheet } => {
                write!(f, "worksheet '{}' has no <table><view> nesting", worksheet)
            }
            StructureIssue::MissingDatasource { worksheet } => write!(
                f,
                "worksheet '{}' has a <datasource-dependencies> block without a datasource",
                worksheet
            ),
        }
    }
}
