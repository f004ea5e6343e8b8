//! Report driver: read a profiling report, extract tracked cost centres,
//! print the results
//!
//! Parse failures are diagnosed on stdout and reported through the return
//! value instead of aborting; the benchmark harness keeps going when one
//! run's report is unusable. I/O failures reading a path are real errors.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::csv_output::CsvOutput;
use crate::extract;
use crate::json_output::JsonReport;
use crate::profile::{self, CostCentreNode, ProfileReport};

/// Settings for one reporting pass
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Cost-centre labels to look up, in output order
    pub names: Vec<String>,
    /// Rendering of the extraction results
    pub format: OutputFormat,
}

/// Report on a single file, or on every `*.prof` file in a results directory.
///
/// Returns `Ok(true)` when every report parsed, `Ok(false)` when at least one
/// was diagnosed as unparseable.
pub fn report_path(path: &Path, config: &ReportConfig) -> Result<bool> {
    if path.is_dir() {
        report_dir(path, config)
    } else {
        report_file(path, config)
    }
}

/// Report on every `*.prof` file in a results directory, in sorted order.
fn report_dir(dir: &Path, config: &ReportConfig) -> Result<bool> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read results directory {}", dir.display()))?;

    let mut reports: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read results directory {}", dir.display()))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "prof") {
            reports.push(path);
        }
    }
    reports.sort();
    debug!(dir = %dir.display(), count = reports.len(), "collected profiling reports");

    if reports.is_empty() {
        println!("No profiling reports found in {}", dir.display());
        return Ok(true);
    }

    let mut all_parsed = true;
    for report in &reports {
        if !report_file(report, config)? {
            all_parsed = false;
        }
    }
    Ok(all_parsed)
}

/// Report on a single profiling report file.
///
/// `Ok(false)` means the file was read but did not parse; the diagnostic has
/// already been printed.
pub fn report_file(path: &Path, config: &ReportConfig) -> Result<bool> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiling report {}", path.display()))?;

    let report = match profile::parse(&contents) {
        Ok(report) => report,
        Err(err) => {
            println!("Error parsing profiling results from {}: {}", path.display(), err);
            return Ok(false);
        }
    };
    debug!(path = %path.display(), roots = report.roots.len(), "parsed profiling report");

    let results = extract::extract(&report, &config.names);
    match config.format {
        OutputFormat::Text => print!("{}", render_text(path, &report, &results)),
        OutputFormat::Json => {
            let json = JsonReport::from_results(path, &report, &results);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => print!("{}", CsvOutput::from_results(&results).to_csv()),
    }
    Ok(true)
}

/// Render extraction results as the default human-readable listing.
fn render_text(
    path: &Path,
    report: &ProfileReport,
    results: &[(String, Option<&CostCentreNode>)],
) -> String {
    let mut out = format!("Profiling results from {}", path.display());
    match (report.total_time_secs, report.total_alloc_bytes) {
        (Some(secs), Some(bytes)) => {
            out.push_str(&format!(" (total time {secs} secs, total alloc {bytes} bytes)"));
        }
        (Some(secs), None) => out.push_str(&format!(" (total time {secs} secs)")),
        (None, Some(bytes)) => out.push_str(&format!(" (total alloc {bytes} bytes)")),
        (None, None) => {}
    }
    out.push('\n');

    for (name, node) in results {
        match node {
            Some(node) => out.push_str(&format!(
                "  {:<16} {:>5.1}% time  {:>5.1}% alloc   ({}, {} calls)\n",
                name, node.time_pct, node.alloc_pct, node.module, node.calls
            )),
            None => out.push_str(&format!("  {name:<16} absent\n")),
        }
    }
    out
}
