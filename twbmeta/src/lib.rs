//! twbmeta: Core library for Tableau workbook metadata extraction
//!
//! Reads `.twb` workbook XML and pulls out the columns (with calculation
//! formulas) each worksheet uses per datasource, and the worksheets placed
//! on each dashboard.

pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod reader;
pub mod record;
pub mod scan;
pub mod writer;

pub use batch::{BatchAborted, BatchReport, FileFailure, FileIssue, run_batch};
pub use config::{ExtractConfig, FailurePolicy};
pub use error::{ExtractError, StructureError, StructureIssue};
pub use extract::{WorkbookMetadata, extract_document, extract_workbook};
pub use record::{ColumnFormulaRecord, DashboardWorksheetRecord, FolderRow};
pub use writer::{CsvSink, MemorySink, RecordSink};
