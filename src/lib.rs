//! Medir - compiler benchmark profile analyzer
//!
//! This library parses the time/allocation profiling reports produced by
//! benchmark runs of a profiled compiler build and extracts the statistics
//! of a tracked set of cost centres for comparison across runs.

pub mod cli;
pub mod csv_output;
pub mod extract;
pub mod json_output;
pub mod profile;
pub mod report;
