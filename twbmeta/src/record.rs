//! Output records extracted from workbooks

use serde::Serialize;

/// One column used by a worksheet through a datasource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFormulaRecord {
    #[serde(rename = "wb_name")]
    pub workbook_name: String,
    #[serde(rename = "ws_name")]
    pub worksheet_name: String,
    #[serde(rename = "ds_id")]
    pub datasource_id: String,
    #[serde(rename = "col_caption")]
    pub column_caption: Option<String>,
    /// Column identifier without its `[` `]` decoration
    #[serde(rename = "col_name")]
    pub column_name: Option<String>,
    /// Calculation formula with `\r\n` collapsed to a space
    #[serde(rename = "col_formula")]
    pub column_formula: Option<String>,
}

impl ColumnFormulaRecord {
    /// Header row of the datasource dependencies table
    pub const HEADERS: [&'static str; 7] = [
        "wb_name",
        "ws_name",
        "ds_id",
        "col_caption",
        "col_name",
        "col_formula",
        "folder_path",
    ];
}

/// One worksheet placed on a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardWorksheetRecord {
    #[serde(rename = "wb_name")]
    pub workbook_name: String,
    #[serde(rename = "dash_name")]
    pub dashboard_name: String,
    #[serde(rename = "ws_name")]
    pub worksheet_name: Option<String>,
}

impl DashboardWorksheetRecord {
    /// Header row of the dashboards table
    pub const HEADERS: [&'static str; 4] = ["wb_name", "dash_name", "ws_name", "folder_path"];
}

/// A record followed by the folder its workbook was found in.
///
/// Serializes as the record's fields then `folder_path`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderRow<'a, R>(pub &'a R, pub &'a str);
