//! Record sinks receiving extracted rows one workbook at a time

mod csv_writer;

pub use csv_writer::{CsvSink, output_file_names};

use anyhow::Result;

use crate::record::{ColumnFormulaRecord, DashboardWorksheetRecord};

/// Destination of extracted records.
///
/// Each call appends the rows of one workbook, tagged with the folder it was
/// found in. `finish` is called once after the last workbook.
pub trait RecordSink {
    fn write_columns(&mut self, folder_path: &str, records: &[ColumnFormulaRecord]) -> Result<()>;
    fn write_dashboards(
        &mut self,
        folder_path: &str,
        records: &[DashboardWorksheetRecord],
    ) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Sink keeping every row in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Column rows with their folder path
    pub columns: Vec<(ColumnFormulaRecord, String)>,
    /// Dashboard rows with their folder path
    pub dashboards: Vec<(DashboardWorksheetRecord, String)>,
    pub finished: bool,
}

impl RecordSink for MemorySink {
    fn write_columns(&mut self, folder_path: &str, records: &[ColumnFormulaRecord]) -> Result<()> {
        self.columns.extend(
            records
                .iter()
                .map(|r| (r.clone(), folder_path.to_string())),
        );
        Ok(())
    }

    fn write_dashboards(
        &mut self,
        folder_path: &str,
        records: &[DashboardWorksheetRecord],
    ) -> Result<()> {
        self.dashboards.extend(
            records
                .iter()
                .map(|r| (r.clone(), folder_path.to_string())),
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
