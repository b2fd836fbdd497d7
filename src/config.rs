//! Dataset profiles
//!
//! A profile describes custom datasets in TOML, for fixtures the built-in
//! large/small datasets do not cover.
//!
//! # Example profile
//!
//! ```toml
//! [[dataset]]
//! file = "leaky_service.csv"
//! start = "2026-03-01 08:00:00"
//! points = 240
//! machine = "BUILD01"
//!
//! [[dataset.process]]
//! name = "service"
//! type = "linear"
//! baseline = 50000000
//! slope = 2048
//!
//! [[dataset.process]]
//! name = "worker"
//! type = "step"
//! baseline = 30000000
//! every = 60
//! increment = 250000
//! jitter = 5000
//! ```

use crate::dataset::{parse_start, DatasetSpec, ProcessSeries, DEFAULT_MACHINE};
use crate::series::SeriesRule;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Root of a profile file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FixtureConfig {
    /// Datasets to generate, in order
    #[serde(default)]
    pub dataset: Vec<DatasetConfig>,
}

/// One `[[dataset]]` table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatasetConfig {
    /// Output file name
    pub file: String,

    /// First timestamp, `YYYY-MM-DD HH:MM:SS`
    pub start: String,

    /// Number of one-minute samples
    pub points: u64,

    /// Machine name in counter paths
    #[serde(default = "default_machine")]
    pub machine: String,

    /// Tracked processes, in column order
    #[serde(default)]
    pub process: Vec<ProcessConfig>,
}

/// One `[[dataset.process]]` table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProcessConfig {
    pub name: String,

    #[serde(flatten)]
    pub rule: SeriesRule,
}

fn default_machine() -> String {
    DEFAULT_MACHINE.to_string()
}

impl FixtureConfig {
    /// Load a profile from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid profile {}", path.display()))
    }

    /// Load a profile from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Convert every dataset table into a validated [`DatasetSpec`]
    pub fn datasets(&self) -> Result<Vec<DatasetSpec>> {
        if self.dataset.is_empty() {
            bail!("Profile defines no [[dataset]] tables");
        }

        let mut files = HashSet::new();
        for dataset in &self.dataset {
            if !files.insert(dataset.file.as_str()) {
                bail!("Profile writes '{}' more than once", dataset.file);
            }
        }

        self.dataset.iter().map(DatasetConfig::to_spec).collect()
    }
}

impl DatasetConfig {
    /// Build and validate the dataset this table describes
    pub fn to_spec(&self) -> Result<DatasetSpec> {
        let spec = DatasetSpec {
            file: self.file.clone(),
            start: parse_start(&self.start)?,
            points: self.points,
            machine: self.machine.clone(),
            processes: self
                .process
                .iter()
                .map(|p| ProcessSeries::new(p.name.clone(), p.rule))
                .collect(),
        };
        spec.validate()?;
        Ok(spec)
    }
}
