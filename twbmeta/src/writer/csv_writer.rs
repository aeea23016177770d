//! CSV output with timestamped file names

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::RecordSink;
use crate::record::{ColumnFormulaRecord, DashboardWorksheetRecord, FolderRow};

/// File names of the two outputs for a run started at `timestamp`
pub fn output_file_names<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = timestamp.format("%Y%m%d_%H%M%S");
    (
        format!("datasource_dependencies_{}.csv", stamp),
        format!("dashboards_{}.csv", stamp),
    )
}

/// Writes column rows and dashboard rows to two CSV files
pub struct CsvSink {
    columns: Writer<File>,
    dashboards: Writer<File>,
    columns_path: PathBuf,
    dashboards_path: PathBuf,
}

impl CsvSink {
    /// Create both files in `output_dir`, stamped with the current local time
    pub fn create<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        Self::create_at(output_dir, &Local::now())
    }

    /// Create both files in `output_dir` (created if missing) and write their headers
    pub fn create_at<P: AsRef<Path>, Tz: TimeZone>(
        output_dir: P,
        timestamp: &DateTime<Tz>,
    ) -> Result<Self>
    where
        Tz::Offset: std::fmt::Display,
    {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let (columns_name, dashboards_name) = output_file_names(timestamp);
        let columns_path = output_dir.join(columns_name);
        let dashboards_path = output_dir.join(dashboards_name);

        let mut columns = open_table(&columns_path)?;
        columns.write_record(ColumnFormulaRecord::HEADERS)?;
        let mut dashboards = open_table(&dashboards_path)?;
        dashboards.write_record(DashboardWorksheetRecord::HEADERS)?;

        Ok(Self {
            columns,
            dashboards,
            columns_path,
            dashboards_path,
        })
    }

    pub fn columns_path(&self) -> &Path {
        &self.columns_path
    }

    pub fn dashboards_path(&self) -> &Path {
        &self.dashboards_path
    }
}

/// Headers are written explicitly since serde cannot name tuple fields
fn open_table(path: &Path) -> Result<Writer<File>> {
    WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))
}

fn write_rows<R: Serialize>(
    writer: &mut Writer<File>,
    folder_path: &str,
    records: &[R],
) -> Result<()> {
    for record in records {
        writer.serialize(FolderRow(record, folder_path))?;
    }
    Ok(())
}

impl RecordSink for CsvSink {
    fn write_columns(&mut self, folder_path: &str, records: &[ColumnFormulaRecord]) -> Result<()> {
        write_rows(&mut self.columns, folder_path, records)
            .with_context(|| format!("Failed to write {}", self.columns_path.display()))
    }

    fn write_dashboards(
        &mut self,
        folder_path: &str,
        records: &[DashboardWorksheetRecord],
    ) -> Result<()> {
        write_rows(&mut self.dashboards, folder_path, records)
            .with_context(|| format!("Failed to write {}", self.dashboards_path.display()))
    }

    fn finish(&mut self) -> Result<()> {
        self.columns
            .flush()
            .with_context(|| format!("Failed to write {}", self.columns_path.display()))?;
        self.dashboards
            .flush()
            .with_context(|| format!("Failed to write {}", self.dashboards_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_output_file_names() {
        let (columns, dashboards) = output_file_names(&fixed_time());
        assert_eq!(columns, "datasource_dependencies_20240307_090501.csv");
        assert_eq!(dashboards, "dashboards_20240307_090501.csv");
    }

    #[test]
    fn test_empty_run_writes_headers_only() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let mut sink = CsvSink::create_at(&out, &fixed_time()).unwrap();
        sink.finish().unwrap();

        let columns = fs::read_to_string(sink.columns_path()).unwrap();
        assert_eq!(
            columns,
            "wb_name,ws_name,ds_id,col_caption,col_name,col_formula,folder_path\n"
        );
        let dashboards = fs::read_to_string(sink.dashboards_path()).unwrap();
        assert_eq!(dashboards, "wb_name,dash_name,ws_name,folder_path\n");
    }

    #[test]
    fn test_rows_are_appended_with_folder() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::create_at(dir.path(), &fixed_time()).unwrap();

        let column = ColumnFormulaRecord {
            workbook_name: "a.twb".to_string(),
            worksheet_name: "Sheet 1".to_string(),
            datasource_id: "ds1".to_string(),
            column_caption: Some("Profit, net".to_string()),
            column_name: Some("Profit".to_string()),
            column_formula: Some("SUM([A]) - \"x\"".to_string()),
        };
        sink.write_columns("in/", &[column.clone()]).unwrap();
        sink.write_columns("in/sub/", &[column]).unwrap();

        let dashboard = DashboardWorksheetRecord {
            workbook_name: "a.twb".to_string(),
            dashboard_name: "Overview".to_string(),
            worksheet_name: None,
        };
        sink.write_dashboards("in/", &[dashboard]).unwrap();
        sink.finish().unwrap();

        let columns = fs::read_to_string(sink.columns_path()).unwrap();
        let lines: Vec<&str> = columns.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#"a.twb,Sheet 1,ds1,"Profit, net",Profit,"SUM([A]) - ""x""",in/"#
        );
        assert!(lines[2].ends_with(",in/sub/"));

        let dashboards = fs::read_to_string(sink.dashboards_path()).unwrap();
        assert_eq!(
            dashboards,
            "wb_name,dash_name,ws_name,folder_path\na.twb,Overview,,in/\n"
        );
    }
}
