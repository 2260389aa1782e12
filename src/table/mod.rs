// src/table/mod.rs
use anyhow::{ensure, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// An in-memory delimited table: named columns, one `String` cell per
/// column per row. The empty string stands in for a missing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Load `path` as a header-row CSV. Short rows are padded with empty
    /// cells so every row matches the header width; a row wider than the
    /// header is an error.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading header row of {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record
                .with_context(|| format!("CSV parse error in {} at row {}", path.display(), idx + 1))?;
            ensure!(
                record.len() <= headers.len(),
                "row {} of {} has {} fields but the header names {}",
                idx + 1,
                path.display(),
                record.len(),
                headers.len()
            );
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Write as CSV: header row, then one line per row, quoting only the
    /// cells that need it. Overwrites `path`.
    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut wtr = WriterBuilder::new().from_writer(BufWriter::new(file));
        if self.headers.is_empty() {
            // an empty source file loads as a headerless table
            return wtr.flush().with_context(|| format!("flushing {}", path.display()));
        }
        wtr.write_record(&self.headers)
            .with_context(|| format!("writing header row of {}", path.display()))?;
        for row in &self.rows {
            wtr.write_record(row)
                .with_context(|| format!("writing data row of {}", path.display()))?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", path.display()))?;
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[idx].as_str())
    }

    /// Drop the column at `idx`, returning its cells in row order.
    pub fn remove_column(&mut self, idx: usize) -> Vec<String> {
        self.headers.remove(idx);
        self.rows.iter_mut().map(|row| row.remove(idx)).collect()
    }

    /// Insert a column at `at`, one value per row.
    pub fn insert_column(&mut self, at: usize, name: String, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.insert(at, name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(at, value);
        }
    }

    pub fn push_column(&mut self, name: String, values: Vec<String>) {
        let at = self.headers.len();
        self.insert_column(at, name, values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn loads_headers_and_rows() -> Result<()> {
        let tmp = write_temp("id,pos\n7,\"[0,0]\"\n8,\"[1,1]\"\n")?;
        let table = Table::from_csv_path(tmp.path())?;

        assert_eq!(table.headers, vec!["id", "pos"]);
        assert_eq!(table.rows.len(), 2);
        // the quoted cell comes back without its quotes
        assert_eq!(table.rows[0], vec!["7", "[0,0]"]);
        assert_eq!(table.rows[1], vec!["8", "[1,1]"]);
        Ok(())
    }

    #[test]
    fn pads_short_rows_to_the_header_width() -> Result<()> {
        let tmp = write_temp("a,b,c\n1,2\n")?;
        let table = Table::from_csv_path(tmp.path())?;
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        Ok(())
    }

    #[test]
    fn rejects_rows_wider_than_the_header() -> Result<()> {
        let tmp = write_temp("a,b\n1,2,3\n")?;
        let err = Table::from_csv_path(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("3 fields"));
        Ok(())
    }

    #[test]
    fn write_quotes_only_when_needed() -> Result<()> {
        let mut table = Table::new(vec!["name".to_string(), "vec".to_string()]);
        table.rows.push(vec!["plain".to_string(), "[1,2]".to_string()]);

        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out.csv");
        table.write_csv_path(&out)?;

        let written = std::fs::read_to_string(&out)?;
        assert_eq!(written, "name,vec\nplain,\"[1,2]\"\n");
        Ok(())
    }

    #[test]
    fn round_trips_through_disk() -> Result<()> {
        let mut table = Table::new(vec!["x".to_string(), "note".to_string()]);
        table.rows.push(vec!["1".to_string(), "has, comma".to_string()]);
        table.rows.push(vec!["2".to_string(), String::new()]);

        let dir = tempfile::tempdir()?;
        let out = dir.path().join("round.csv");
        table.write_csv_path(&out)?;
        let reloaded = Table::from_csv_path(&out)?;

        assert_eq!(reloaded, table);
        Ok(())
    }

    #[test]
    fn column_surgery_keeps_rows_aligned() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.rows.push(vec!["1".to_string(), "2".to_string()]);
        table.rows.push(vec!["3".to_string(), "4".to_string()]);

        let removed = table.remove_column(0);
        assert_eq!(removed, vec!["1", "3"]);
        assert_eq!(table.headers, vec!["b"]);

        table.push_column("c".to_string(), vec!["x".to_string(), "y".to_string()]);
        table.insert_column(0, "front".to_string(), vec!["f1".to_string(), "f2".to_string()]);
        assert_eq!(table.headers, vec!["front", "b", "c"]);
        assert_eq!(table.rows[1], vec!["f2", "4", "y"]);
        assert_eq!(table.column_index("c"), Some(2));
    }
}
