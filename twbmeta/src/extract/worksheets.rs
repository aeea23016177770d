//! Columns used by each worksheet, grouped by datasource

use super::formula::{extract_formula, strip_brackets};
use crate::error::{StructureError, StructureIssue};
use crate::reader::{Document, XmlNode};
use crate::record::ColumnFormulaRecord;

/// Pseudo datasource holding workbook parameters
pub const PARAMETERS_DATASOURCE: &str = "Parameters";

/// Column records of one workbook plus the worksheet parts that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorksheetColumns {
    pub records: Vec<ColumnFormulaRecord>,
    pub issues: Vec<StructureIssue>,
}

/// Extract one record per column of every non-parameter datasource dependency.
///
/// Records come out in document order. A worksheet without `<table><view>` or
/// a dependency block without a datasource is skipped and reported in
/// `issues`; the rest of the workbook is still read.
pub fn extract_column_formulas(
    doc: &Document,
    workbook_name: &str,
) -> Result<WorksheetColumns, StructureError> {
    let worksheets = doc
        .root()
        .find("worksheets")
        .ok_or(StructureError::MissingElement {
            element: "worksheets",
        })?;

    let mut result = WorksheetColumns::default();

    for worksheet in worksheets.find_all("worksheet") {
        let worksheet_name = worksheet.attr("name").unwrap_or_default();

        let Some(view) = worksheet_view(worksheet) else {
            result.issues.push(StructureIssue::MissingView {
                worksheet: worksheet_name.to_string(),
            });
            continue;
        };

        for dependencies in view.find_all("datasource-dependencies") {
            let Some(datasource) = dependencies.attr("datasource") else {
                result.issues.push(StructureIssue::MissingDatasource {
                    worksheet: worksheet_name.to_string(),
                });
                continue;
            };
            if datasource == PARAMETERS_DATASOURCE {
                continue;
            }

            for column in dependencies.find_all("column") {
                result.records.push(ColumnFormulaRecord {
                    workbook_name: workbook_name.to_string(),
                    worksheet_name: worksheet_name.to_string(),
                    datasource_id: datasource.to_string(),
                    column_caption: column.attr("caption").map(str::to_string),
                    column_name: column.attr("name").map(|n| strip_brackets(n).to_string()),
                    column_formula: extract_formula(column),
                });
            }
        }
    }

    Ok(result)
}

fn worksheet_view(worksheet: &XmlNode) -> Option<&XmlNode> {
    worksheet.find("table")?.find("view")
}
