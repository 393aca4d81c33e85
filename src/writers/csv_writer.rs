use crate::error::Result;
use crate::models::{ClimatologyRecord, DailyRecord};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the daily and climatology tables as CSV with a header row.
///
/// Absent temperatures are written as empty fields.
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn write_daily<W: Write>(&self, records: &[DailyRecord], out: W) -> Result<usize> {
        self.write_rows(records, out)
    }

    pub fn write_climatology<W: Write>(
        &self,
        records: &[ClimatologyRecord],
        out: W,
    ) -> Result<usize> {
        self.write_rows(records, out)
    }

    /// Write the daily table to `path`, creating parent directories.
    pub fn write_daily_to_path(&self, records: &[DailyRecord], path: &Path) -> Result<usize> {
        let written = self.write_daily(records, create_file(path)?)?;
        info!(rows = written, path = %path.display(), "Daily table written");
        Ok(written)
    }

    pub fn write_climatology_to_path(
        &self,
        records: &[ClimatologyRecord],
        path: &Path,
    ) -> Result<usize> {
        let written = self.write_climatology(records, create_file(path)?)?;
        info!(rows = written, path = %path.display(), "Climatology table written");
        Ok(written)
    }

    fn write_rows<T: Serialize, W: Write>(&self, rows: &[T], out: W) -> Result<usize> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(out);

        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(rows.len())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_daily() {
        let records = vec![
            DailyRecord::new(NaiveDate::from_ymd_opt(1877, 12, 31).unwrap(), -1.5, None, None),
            DailyRecord::new(
                NaiveDate::from_ymd_opt(1878, 1, 1).unwrap(),
                2.0,
                Some(-0.5),
                Some(4.5),
            ),
        ];

        let mut buffer = Vec::new();
        let written = CsvWriter::new().write_daily(&records, &mut buffer).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,year,month,day,mean,min,max");
        assert_eq!(lines[1], "1877-12-31,1877,12,31,-1.5,,");
        assert_eq!(lines[2], "1878-01-01,1878,1,1,2.0,-0.5,4.5");
    }

    #[test]
    fn test_write_climatology_to_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("climatology.csv");
        let records = vec![ClimatologyRecord {
            month: 2,
            day: 29,
            low: None,
            high: Some(12.0),
            average: 4.25,
            p05: 0.5,
            p95: 8.0,
            observations: 4,
        }];

        let written = CsvWriter::new()
            .with_delimiter(b';')
            .write_climatology_to_path(&records, &path)
            .unwrap();
        assert_eq!(written, 1);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "month;day;low;high;average;p05;p95;observations\n2;29;;12.0;4.25;0.5;8.0;4\n"
        );
    }
}
