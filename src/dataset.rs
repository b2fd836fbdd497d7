//! Dataset definitions
//!
//! A [`DatasetSpec`] names the output file, the first timestamp, how many
//! one-minute samples to produce and which processes to track. The two
//! built-in datasets are [`DatasetSpec::large`] and [`DatasetSpec::small`].

use crate::error::{FixtureError, Result};
use crate::series::{row_rng, SeriesRule};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// First field of every PDH-CSV header
pub const PDH_HEADER: &str = "(PDH-CSV 4.0)";

/// Machine name used in counter paths unless a profile overrides it
pub const DEFAULT_MACHINE: &str = "SERVER";

/// Counter sampled for every process
pub const COUNTER_NAME: &str = "Private Bytes";

/// Timestamp layout of PDH-CSV rows; milliseconds are always zero
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S.000";

/// Layout accepted for `start` in dataset profiles
pub const START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default output file of the large dataset
pub const LARGE_FILE: &str = "test_data_60h.csv";

/// Default output file of the small dataset
pub const SMALL_FILE: &str = "test_data_small.csv";

/// Default duration of the large dataset
pub const DEFAULT_HOURS: u32 = 60;

/// Samples in the small dataset
pub const SMALL_POINTS: u64 = 30;

/// Samples per hour (one per minute)
pub const POINTS_PER_HOUR: u64 = 60;

/// One tracked process and the rule producing its values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSeries {
    pub name: String,
    pub rule: SeriesRule,
}

impl ProcessSeries {
    pub fn new(name: impl Into<String>, rule: SeriesRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

/// Everything needed to produce one fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Output file name (relative to the output directory)
    pub file: String,
    /// Timestamp of row 0
    pub start: NaiveDateTime,
    /// Number of data rows
    pub points: u64,
    /// Machine name in counter paths
    pub machine: String,
    /// Tracked processes, in column order
    pub processes: Vec<ProcessSeries>,
}

impl DatasetSpec {
    /// The 60-hour style dataset: steady leak, noise, stepwise leak
    ///
    /// `hours` must be at least 1.
    pub fn large(hours: u32) -> Result<Self> {
        if hours == 0 {
            return Err(FixtureError::InvalidHours(hours));
        }

        Ok(Self {
            file: large_file_name(hours),
            start: instant(2026, 1, 15, 10)?,
            points: u64::from(hours) * POINTS_PER_HOUR,
            machine: DEFAULT_MACHINE.to_string(),
            processes: vec![
                // 5 KiB per minute
                ProcessSeries::new(
                    "app1",
                    SeriesRule::Linear {
                        baseline: 10_000_000,
                        slope: 5120,
                    },
                ),
                ProcessSeries::new(
                    "app2",
                    SeriesRule::Noise {
                        baseline: 20_000_000,
                        amplitude: 50_000,
                    },
                ),
                // new plateau every 30 minutes
                ProcessSeries::new(
                    "app3",
                    SeriesRule::Step {
                        baseline: 15_000_000,
                        every: 30,
                        increment: 100_000,
                        jitter: 10_000,
                    },
                ),
            ],
        })
    }

    /// The 30-minute smoke-test dataset: linear growth and a 5-sample cycle
    pub fn small() -> Result<Self> {
        Ok(Self {
            file: SMALL_FILE.to_string(),
            start: instant(2026, 2, 11, 10)?,
            points: SMALL_POINTS,
            machine: DEFAULT_MACHINE.to_string(),
            processes: vec![
                // 10 KiB per minute
                ProcessSeries::new(
                    "test1",
                    SeriesRule::Linear {
                        baseline: 5_000_000,
                        slope: 10_240,
                    },
                ),
                ProcessSeries::new(
                    "test2",
                    SeriesRule::Periodic {
                        baseline: 8_000_000,
                        period: 5,
                        increment: 5000,
                    },
                ),
            ],
        })
    }

    /// Replace the output file name
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Check the invariants every generated file relies on
    pub fn validate(&self) -> Result<()> {
        if self.points == 0 {
            return Err(FixtureError::invalid_dataset(
                &self.file,
                "points must be at least 1",
            ));
        }

        if self.processes.is_empty() {
            return Err(FixtureError::invalid_dataset(
                &self.file,
                "at least one process is required",
            ));
        }

        if self.checked_timestamp(self.points - 1).is_none() {
            return Err(FixtureError::invalid_dataset(
                &self.file,
                "last timestamp is out of range",
            ));
        }

        let mut seen = HashSet::new();
        for process in &self.processes {
            if process.name.is_empty() {
                return Err(FixtureError::invalid_dataset(
                    &self.file,
                    "process names must not be empty",
                ));
            }
            if !seen.insert(process.name.as_str()) {
                return Err(FixtureError::invalid_dataset(
                    &self.file,
                    format!("duplicate process '{}'", process.name),
                ));
            }

            match process.rule {
                SeriesRule::Step { every: 0, .. } => {
                    return Err(FixtureError::invalid_dataset(
                        &self.file,
                        format!("process '{}': every must be at least 1", process.name),
                    ));
                }
                SeriesRule::Periodic { period: 0, .. } => {
                    return Err(FixtureError::invalid_dataset(
                        &self.file,
                        format!("process '{}': period must be at least 1", process.name),
                    ));
                }
                _ => {}
            }

            if process.rule.max_jitter() > process.rule.baseline() {
                return Err(FixtureError::invalid_dataset(
                    &self.file,
                    format!(
                        "process '{}': jitter {} exceeds baseline {}",
                        process.name,
                        process.rule.max_jitter(),
                        process.rule.baseline()
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Header row: PDH marker followed by one counter path per process
    pub fn header(&self) -> Vec<String> {
        std::iter::once(PDH_HEADER.to_string())
            .chain(
                self.processes
                    .iter()
                    .map(|p| counter_path(&self.machine, &p.name)),
            )
            .collect()
    }

    /// Number of fields in every row
    pub fn columns(&self) -> usize {
        self.processes.len() + 1
    }

    /// Timestamp of row `index`, or `None` past the end of the calendar
    pub fn checked_timestamp(&self, index: u64) -> Option<NaiveDateTime> {
        let minutes = i64::try_from(index).ok()?;
        Duration::try_minutes(minutes).and_then(|offset| self.start.checked_add_signed(offset))
    }

    /// Timestamp of row `index`
    ///
    /// Saturates at the last representable instant; [`DatasetSpec::validate`]
    /// rejects datasets that would get there.
    pub fn timestamp(&self, index: u64) -> NaiveDateTime {
        self.checked_timestamp(index).unwrap_or(NaiveDateTime::MAX)
    }

    /// Timestamp of row `index`, formatted for the CSV
    pub fn formatted_timestamp(&self, index: u64) -> String {
        self.timestamp(index).format(TIMESTAMP_FORMAT).to_string()
    }

    /// Values of row `index`, one per process in column order
    ///
    /// The row generator is re-seeded with `index` and shared across the
    /// row's randomized columns.
    pub fn values(&self, index: u64) -> Vec<u64> {
        let mut rng = row_rng(index);
        self.processes
            .iter()
            .map(|p| p.rule.value(index, &mut rng))
            .collect()
    }

    /// Full data row `index` as CSV fields
    pub fn row(&self, index: u64) -> Vec<String> {
        std::iter::once(self.formatted_timestamp(index))
            .chain(self.values(index).into_iter().map(|v| v.to_string()))
            .collect()
    }
}

/// PDH counter path for `process` on `machine`
///
/// ```
/// use perfmon_fixtures::dataset::counter_path;
///
/// assert_eq!(
///     counter_path("SERVER", "app1"),
///     r"\\SERVER\Process(app1)\Private Bytes"
/// );
/// ```
pub fn counter_path(machine: &str, process: &str) -> String {
    format!(r"\\{}\Process({})\{}", machine, process, COUNTER_NAME)
}

/// File name of the large dataset for a given duration
pub fn large_file_name(hours: u32) -> String {
    if hours == DEFAULT_HOURS {
        LARGE_FILE.to_string()
    } else {
        format!("test_data_{}h.csv", hours)
    }
}

/// Parse a profile `start` value
pub fn parse_start(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, START_FORMAT)
        .map_err(|_| FixtureError::InvalidStart(value.to_string()))
}

fn instant(year: i32, month: u32, day: u32, hour: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| {
            FixtureError::InvalidStart(format!("{:04}-{:02}-{:02} {:02}:00:00", year, month, day, hour))
        })
}
