//! PDH-CSV output
//!
//! Rows are written as soon as they are produced; the only buffering is the
//! writer's own.

use crate::error::Result;
use clap::ValueEnum;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Row terminator for generated files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LineEnding {
    /// `\r\n`, as written by the Windows perfmon tools (default)
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    fn terminator(self) -> csv::Terminator {
        match self {
            LineEnding::Crlf => csv::Terminator::CRLF,
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

/// Streaming PDH-CSV writer
///
/// Enforces that every row has as many fields as the header.
pub struct PdhCsvWriter<W: Write> {
    inner: csv::Writer<W>,
    columns: usize,
    rows: u64,
}

impl PdhCsvWriter<File> {
    /// Create (or truncate) `path` and write to it
    pub fn create<P: AsRef<Path>>(path: P, line_ending: LineEnding) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file, line_ending))
    }
}

impl<W: Write> PdhCsvWriter<W> {
    /// Wrap any writer
    pub fn new(writer: W, line_ending: LineEnding) -> Self {
        let inner = csv::WriterBuilder::new()
            .terminator(line_ending.terminator())
            .quote_style(csv::QuoteStyle::Necessary)
            .flexible(false)
            .from_writer(writer);

        Self {
            inner,
            columns: 0,
            rows: 0,
        }
    }

    /// Write the header row; fixes the column count for the data rows
    pub fn write_header<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let record = csv::ByteRecord::from_iter(fields);
        self.columns = record.len();
        self.inner.write_byte_record(&record)?;
        Ok(())
    }

    /// Write one data row
    pub fn write_row<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.inner.write_record(fields)?;
        self.rows += 1;
        Ok(())
    }

    /// Columns fixed by the header
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Data rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush buffered rows and return the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        self.inner
            .into_inner()
            .map_err(|e| crate::error::FixtureError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(line_ending: LineEnding) -> String {
        let mut writer = PdhCsvWriter::new(Vec::new(), line_ending);
        writer
            .write_header(["(PDH-CSV 4.0)", r"\\SERVER\Process(a)\Private Bytes"])
            .unwrap();
        writer.write_row(["01/15/2026 10:00:00.000", "42"]).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_crlf_output() {
        assert_eq!(
            written(LineEnding::Crlf),
            "(PDH-CSV 4.0),\\\\SERVER\\Process(a)\\Private Bytes\r\n01/15/2026 10:00:00.000,42\r\n"
        );
    }

    #[test]
    fn test_lf_output() {
        assert_eq!(
            written(LineEnding::Lf),
            "(PDH-CSV 4.0),\\\\SERVER\\Process(a)\\Private Bytes\n01/15/2026 10:00:00.000,42\n"
        );
    }

    #[test]
    fn test_backslashes_and_spaces_are_not_quoted() {
        let out = written(LineEnding::Lf);
        assert!(!out.contains('"'));
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        let mut writer = PdhCsvWriter::new(Vec::new(), LineEnding::Lf);
        writer.write_header(["(PDH-CSV 4.0)", "a,b"]).unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "(PDH-CSV 4.0),\"a,b\"\n");
    }

    #[test]
    fn test_row_length_mismatch_is_rejected() {
        let mut writer = PdhCsvWriter::new(Vec::new(), LineEnding::Lf);
        writer.write_header(["(PDH-CSV 4.0)", "x", "y"]).unwrap();
        assert!(writer.write_row(["t", "1"]).is_err());
    }

    #[test]
    fn test_counts() {
        let mut writer = PdhCsvWriter::new(Vec::new(), LineEnding::Lf);
        writer.write_header(["h", "a"]).unwrap();
        writer.write_row(["t0", "1"]).unwrap();
        writer.write_row(["t1", "2"]).unwrap();
        assert_eq!(writer.columns(), 2);
        assert_eq!(writer.rows(), 2);
    }
}
