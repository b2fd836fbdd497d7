//! perfmon-fixtures - synthetic PDH-CSV performance counter logs
//!
//! This library fabricates `Private Bytes` time series for named processes
//! (steady leak, noise only, stepwise leak, periodic) and writes them in the
//! CSV layout produced by Windows Performance Monitor, for use as fixture
//! data when testing leak analysis.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod series;
