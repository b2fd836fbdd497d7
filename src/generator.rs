//! Fixture generation
//!
//! [`generate_large_dataset`] and [`generate_small_dataset`] write the two
//! built-in fixtures; [`generate`] writes any [`DatasetSpec`]. Each call is a
//! single pass: header, then one row per sample, streamed to disk.
//!
//! Failures are returned as-is. A write error part-way through leaves the
//! partial file in place.

use crate::csv_output::{LineEnding, PdhCsvWriter};
use crate::dataset::DatasetSpec;
use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of one generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub path: PathBuf,
    pub data_points: u64,
    pub columns: usize,
}

impl GenerationReport {
    /// Human-readable confirmation line
    pub fn confirmation(&self) -> String {
        format!(
            "✓ {} created ({} data points)",
            self.path.display(),
            self.data_points
        )
    }
}

/// Write the large dataset (`hours * 60` samples) to `path`
pub fn generate_large_dataset<P: AsRef<Path>>(path: P, hours: u32) -> Result<GenerationReport> {
    let spec = DatasetSpec::large(hours)?;
    generate(&spec, path, LineEnding::default())
}

/// Write the 30-sample dataset to `path`
pub fn generate_small_dataset<P: AsRef<Path>>(path: P) -> Result<GenerationReport> {
    let spec = DatasetSpec::small()?;
    generate(&spec, path, LineEnding::default())
}

/// Write `spec` to `path`
///
/// The spec is validated before the file is created.
pub fn generate<P: AsRef<Path>>(
    spec: &DatasetSpec,
    path: P,
    line_ending: LineEnding,
) -> Result<GenerationReport> {
    let path = path.as_ref();
    spec.validate()?;

    debug!(
        path = %path.display(),
        points = spec.points,
        processes = spec.processes.len(),
        randomized = spec.processes.iter().filter(|p| p.rule.is_randomized()).count(),
        start = %spec.start,
        "Generating dataset"
    );

    let writer = PdhCsvWriter::create(path, line_ending)?;
    let data_points = stream_rows(spec, writer)?;

    info!(path = %path.display(), data_points, "Dataset written");

    Ok(GenerationReport {
        path: path.to_path_buf(),
        data_points,
        columns: spec.columns(),
    })
}

/// Write `spec` to any writer, returning the number of data rows
pub fn write_dataset<W: Write>(spec: &DatasetSpec, writer: W, line_ending: LineEnding) -> Result<u64> {
    spec.validate()?;
    stream_rows(spec, PdhCsvWriter::new(writer, line_ending))
}

/// The default run: large dataset then small dataset, both in `dir`
///
/// `on_report` is called as soon as each file is complete.
pub fn generate_default_fixtures<P, F>(
    dir: P,
    hours: u32,
    line_ending: LineEnding,
    on_report: F,
) -> Result<Vec<GenerationReport>>
where
    P: AsRef<Path>,
    F: FnMut(&GenerationReport),
{
    let specs = [DatasetSpec::large(hours)?, DatasetSpec::small()?];
    generate_all(dir, &specs, line_ending, on_report)
}

/// Generate a list of datasets into `dir`, stopping at the first failure
///
/// `on_report` is called as soon as each file is complete, before the next
/// one is started.
pub fn generate_all<P, F>(
    dir: P,
    specs: &[DatasetSpec],
    line_ending: LineEnding,
    mut on_report: F,
) -> Result<Vec<GenerationReport>>
where
    P: AsRef<Path>,
    F: FnMut(&GenerationReport),
{
    let dir = dir.as_ref();
    let mut reports = Vec::with_capacity(specs.len());
    for spec in specs {
        let report = generate(spec, dir.join(&spec.file), line_ending)?;
        on_report(&report);
        reports.push(report);
    }
    Ok(reports)
}

fn stream_rows<W: Write>(spec: &DatasetSpec, mut writer: PdhCsvWriter<W>) -> Result<u64> {
    writer.write_header(spec.header())?;
    for index in 0..spec.points {
        writer.write_row(spec.row(index))?;
    }
    let rows = writer.rows();
    writer.finish()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixtureError;
    use tempfile::TempDir;

    fn lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_large_one_hour() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one_hour.csv");
        let report = generate_large_dataset(&path, 1).unwrap();

        assert_eq!(report.data_points, 60);
        assert_eq!(report.columns, 4);

        let lines = lines(&path);
        assert_eq!(lines.len(), 61);
        assert!(lines[1].starts_with("01/15/2026 10:00:00.000,10000000,"));
        assert!(lines[60].starts_with("01/15/2026 10:59:00.000,"));
    }

    #[test]
    fn test_large_zero_hours_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never.csv");
        let err = generate_large_dataset(&path, 0).unwrap_err();
        assert!(matches!(err, FixtureError::InvalidHours(0)));
        assert!(!path.exists());
    }

    #[test]
    fn test_small_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.csv");
        let report = generate_small_dataset(&path).unwrap();
        assert_eq!(report.data_points, 30);

        let lines = lines(&path);
        assert_eq!(lines.len(), 31);
        assert_eq!(lines[30], "02/11/2026 10:29:00.000,5296960,8020000");
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("small.csv");
        let err = generate_small_dataset(&path).unwrap_err();
        assert!(matches!(err, FixtureError::Io(_)));
    }

    #[test]
    fn test_write_dataset_in_memory() {
        let spec = DatasetSpec::small().unwrap();
        let mut buf = Vec::new();
        let rows = write_dataset(&spec, &mut buf, LineEnding::Lf).unwrap();
        assert_eq!(rows, 30);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("(PDH-CSV 4.0),"));
        assert_eq!(text.matches('\n').count(), 31);
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_default_fixtures_order_and_names() {
        let dir = TempDir::new().unwrap();
        let mut seen = Vec::new();
        let reports = generate_default_fixtures(dir.path(), 1, LineEnding::Crlf, |r| {
            // the file is complete by the time it is reported
            assert!(r.path.exists());
            seen.push(r.path.clone());
        })
        .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(seen, vec![reports[0].path.clone(), reports[1].path.clone()]);
        assert_eq!(reports[0].path, dir.path().join("test_data_1h.csv"));
        assert_eq!(reports[1].path, dir.path().join("test_data_small.csv"));
        assert!(reports.iter().all(|r| r.path.exists()));
    }

    #[test]
    fn test_confirmation_line() {
        let report = GenerationReport {
            path: PathBuf::from("test_data_small.csv"),
            data_points: 30,
            columns: 3,
        };
        assert_eq!(
            report.confirmation(),
            "✓ test_data_small.csv created (30 data points)"
        );
    }

    #[test]
    fn test_generate_all_stops_on_invalid_spec() {
        let dir = TempDir::new().unwrap();
        let mut broken = DatasetSpec::small().unwrap().with_file("broken.csv");
        broken.processes.clear();
        let good = DatasetSpec::small().unwrap().with_file("good.csv");

        let mut reported = 0;
        let specs = [good.clone(), broken, good.with_file("late.csv")];
        let err = generate_all(dir.path(), &specs, LineEnding::Lf, |_| reported += 1).unwrap_err();
        assert!(matches!(err, FixtureError::InvalidDataset { .. }));
        assert_eq!(reported, 1);
        assert!(dir.path().join("good.csv").exists());
        assert!(!dir.path().join("late.csv").exists());
    }
}
