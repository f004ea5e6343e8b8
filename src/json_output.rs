//! JSON output format for extraction results
//!
//! `--format json` rendering, one object per report file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::profile::{CostCentreNode, ProfileReport};

/// One queried cost centre in the JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCostCentre {
    /// Queried annotation label
    pub name: String,
    /// Whether the label was found anywhere in the tree
    pub found: bool,
    /// Module of the matched node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Source span of the matched node, when the report carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Individual time share, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_percent: Option<f64>,
    /// Individual allocation share, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alloc_percent: Option<f64>,
    /// Times the cost centre was entered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calls: Option<u64>,
}

/// JSON document for one report file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Path the report was read from
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_alloc_bytes: Option<u64>,
    pub cost_centres: Vec<JsonCostCentre>,
}

impl JsonReport {
    /// Build the JSON document from extraction results.
    pub fn from_results(
        path: &Path,
        report: &ProfileReport,
        results: &[(String, Option<&CostCentreNode>)],
    ) -> Self {
        let cost_centres = results
            .iter()
            .map(|(name, node)| match node {
                Some(node) => JsonCostCentre {
                    name: name.clone(),
                    found: true,
                    module: Some(node.module.clone()),
                    src: node.src.clone(),
                    time_percent: Some(node.time_pct),
                    alloc_percent: Some(node.alloc_pct),
                    calls: Some(node.calls),
                },
                None => JsonCostCentre {
                    name: name.clone(),
                    found: false,
                    module: None,
                    src: None,
                    time_percent: None,
                    alloc_percent: None,
                    calls: None,
                },
            })
            .collect();

        Self {
            file: path.display().to_string(),
            total_time_secs: report.total_time_secs,
            total_alloc_bytes: report.total_alloc_bytes,
            cost_centres,
        }
    }
}
