use crate::error::{ProcessingError, Result};
use crate::models::{GridRow, RawGrid};
use crate::readers::DataSource;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, GRID_COLUMNS, SENTINEL};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Reads whitespace-delimited annual grids: `year day jan feb ... dec` per line.
pub struct GridReader {
    use_mmap: bool,
}

impl GridReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read a grid from a local file or a remote URL
    pub fn read_grid(&self, source: &DataSource) -> Result<RawGrid> {
        info!(source = %source, "Loading temperature grid");
        let grid = match source {
            DataSource::Local(path) => self.read_local(path)?,
            DataSource::Remote(url) => self.fetch_remote(url)?,
        };
        info!(source = %source, rows = grid.rows().len(), "Grid loaded");
        Ok(grid)
    }

    /// Read a grid from disk
    pub fn read_local(&self, path: &Path) -> Result<RawGrid> {
        if self.use_mmap {
            self.read_local_mmap(path)
        } else {
            self.read_local_buffered(path)
        }
    }

    fn read_local_buffered(&self, path: &Path) -> Result<RawGrid> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| ProcessingError::data_source(&name, e))?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut rows = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| ProcessingError::data_source(&name, e))?;
            if let Some(row) = Self::parse_grid_line(&line, index + 1, &name)? {
                rows.push(row);
            }
        }

        RawGrid::new(name, rows)
    }

    fn read_local_mmap(&self, path: &Path) -> Result<RawGrid> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| ProcessingError::data_source(&name, e))?;
        // SAFETY: the file is opened read-only and not modified while mapped.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| ProcessingError::data_source(&name, e))?;
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| ProcessingError::data_source(&name, format!("invalid UTF-8: {}", e)))?;

        Self::parse_str(&name, content)
    }

    /// Download a grid over HTTP
    fn fetch_remote(&self, url: &str) -> Result<RawGrid> {
        debug!(url, "Requesting remote grid");
        let response =
            reqwest::blocking::get(url).map_err(|e| ProcessingError::data_source(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::data_source(
                url,
                format!("HTTP request failed with status {}", status),
            ));
        }

        let body = response
            .text()
            .map_err(|e| ProcessingError::data_source(url, e))?;

        Self::parse_str(url, &body)
    }

    /// Parse grid text already in memory
    pub fn parse_str(source_name: &str, content: &str) -> Result<RawGrid> {
        let mut rows = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if let Some(row) = Self::parse_grid_line(line, index + 1, source_name)? {
                rows.push(row);
            }
        }
        RawGrid::new(source_name, rows)
    }

    /// Parse one grid line; blank lines yield `None`
    fn parse_grid_line(line: &str, line_number: usize, source_name: &str) -> Result<Option<GridRow>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i32>().map_err(|_| {
                    ProcessingError::data_source(
                        source_name,
                        format!("line {}: invalid integer '{}'", line_number, token),
                    )
                })
            })
            .collect::<Result<Vec<i32>>>()?;

        if values.len() != GRID_COLUMNS {
            return Err(ProcessingError::data_source(
                source_name,
                format!(
                    "line {}: expected {} columns, found {}",
                    line_number,
                    GRID_COLUMNS,
                    values.len()
                ),
            ));
        }

        let day = u32::try_from(values[1]).map_err(|_| {
            ProcessingError::data_source(
                source_name,
                format!("line {}: invalid day index {}", line_number, values[1]),
            )
        })?;

        let mut cells = [None; 12];
        for (cell, &raw) in cells.iter_mut().zip(&values[2..]) {
            *cell = (raw != SENTINEL).then_some(raw);
        }

        Ok(Some(GridRow::new(values[0], day, cells)))
    }
}

impl Default for GridReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calendar::Month;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_grid_line() {
        let line = " 1772    1   32  -15   18   25   87  128  187  177  167   76   14   -5";
        let row = GridReader::parse_grid_line(line, 1, "test").unwrap().unwrap();

        assert_eq!(row.year, 1772);
        assert_eq!(row.day, 1);
        assert_eq!(row.cell(Month::January), Some(32));
        assert_eq!(row.cell(Month::February), Some(-15));
        assert_eq!(row.cell(Month::December), Some(-5));
    }

    #[test]
    fn test_sentinel_decoded_to_none() {
        let line = "2019   30  50 -999  60 70 80 90 100 110 120 130 140 -999";
        let row = GridReader::parse_grid_line(line, 1, "test").unwrap().unwrap();
        assert_eq!(row.cell(Month::February), None);
        assert_eq!(row.cell(Month::December), None);
        assert_eq!(row.cell(Month::March), Some(60));
    }

    #[test]
    fn test_malformed_lines_rejected() {
        let short = GridReader::parse_grid_line("2019 1 10 20", 3, "test");
        assert!(short.unwrap_err().is_data_source());

        let not_a_number = GridReader::parse_grid_line(
            "2019 1 10 20 30 40 50 60 7x 80 90 100 110 120",
            4,
            "test",
        );
        let err = not_a_number.unwrap_err();
        assert!(err.is_data_source());
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_trailing_blank_line_discarded() {
        let text = "2020 1 1 2 3 4 5 6 7 8 9 10 11 12\n2020 2 1 2 3 4 5 6 7 8 9 10 11 12\n\n";
        let grid = GridReader::parse_str("inline", text).unwrap();
        assert_eq!(grid.rows().len(), 2);
    }

    #[test]
    fn test_read_grid_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "2020    1  10  20  30  40  50  60  70  80  90 100 110 120")?;
        writeln!(file, "2020    2  11  21  31  41  51  61  71  81  91 101 111 -999")?;
        writeln!(file)?;

        let source = DataSource::Local(file.path().to_path_buf());
        for reader in [GridReader::new(), GridReader::with_mmap(true)] {
            let grid = reader.read_grid(&source)?;
            assert_eq!(grid.rows().len(), 2);
            assert_eq!(grid.rows()[1].cell(Month::November), Some(111));
            assert_eq!(grid.rows()[1].cell(Month::December), None);
        }

        Ok(())
    }

    #[test]
    fn test_missing_file_is_data_source_error() {
        let source = DataSource::Local("/nonexistent/hadcet_mean.txt".into());
        let err = GridReader::new().read_grid(&source).unwrap_err();
        assert!(err.is_data_source());
    }
}
