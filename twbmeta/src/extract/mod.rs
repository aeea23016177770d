//! Metadata extraction from parsed workbook documents

use encoding_rs::Encoding;
use std::path::Path;

pub mod dashboards;
pub mod formula;
pub mod worksheets;

pub use dashboards::extract_dashboards;
pub use formula::{extract_formula, strip_brackets};
pub use worksheets::{PARAMETERS_DATASOURCE, WorksheetColumns, extract_column_formulas};

use crate::error::{ExtractError, StructureIssue};
use crate::reader::{self, Document};
use crate::record::{ColumnFormulaRecord, DashboardWorksheetRecord};

/// Everything extracted from one workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookMetadata {
    pub columns: Vec<ColumnFormulaRecord>,
    pub dashboards: Vec<DashboardWorksheetRecord>,
    /// Worksheet parts skipped as malformed
    pub issues: Vec<StructureIssue>,
}

/// Run both extractors over an already parsed document
pub fn extract_document(
    doc: &Document,
    workbook_name: &str,
) -> Result<WorkbookMetadata, ExtractError> {
    let WorksheetColumns { records, issues } = extract_column_formulas(doc, workbook_name)?;
    let dashboards = extract_dashboards(doc, workbook_name)?;

    Ok(WorkbookMetadata {
        columns: records,
        dashboards,
        issues,
    })
}

/// Load, parse and extract a workbook file. The file name is used as the workbook name.
pub fn extract_workbook<P: AsRef<Path>>(
    path: P,
    encoding: &'static Encoding,
) -> Result<WorkbookMetadata, ExtractError> {
    let path_ref = path.as_ref();
    let workbook_name = path_ref
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let doc = reader::read_document(path_ref, encoding)?;
    extract_document(&doc, &workbook_name)
}
