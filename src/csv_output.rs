//! CSV output format for extraction results
//!
//! `--format csv` rendering for spreadsheet analysis and machine parsing.

use crate::profile::CostCentreNode;

/// CSV output formatter for one report's extraction results
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<CsvRow>,
}

/// One queried cost centre as a CSV row
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub name: String,
    pub found: bool,
    pub module: String,
    pub time_percent: Option<f64>,
    pub alloc_percent: Option<f64>,
    pub calls: Option<u64>,
}

impl CsvOutput {
    /// Create an empty formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the formatter from extraction results.
    pub fn from_results(results: &[(String, Option<&CostCentreNode>)]) -> Self {
        let mut output = Self::new();
        for (name, node) in results {
            output.add_row(match node {
                Some(node) => CsvRow {
                    name: name.clone(),
                    found: true,
                    module: node.module.clone(),
                    time_percent: Some(node.time_pct),
                    alloc_percent: Some(node.alloc_pct),
                    calls: Some(node.calls),
                },
                None => CsvRow {
                    name: name.clone(),
                    found: false,
                    module: String::new(),
                    time_percent: None,
                    alloc_percent: None,
                    calls: None,
                },
            });
        }
        output
    }

    /// Add a row to the output
    pub fn add_row(&mut self, row: CsvRow) {
        self.rows.push(row);
    }

    fn header() -> &'static str {
        "cost_centre,found,module,time_percent,alloc_percent,calls"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(row: &CsvRow) -> String {
        let fields = [
            Self::escape_field(&row.name),
            row.found.to_string(),
            Self::escape_field(&row.module),
            row.time_percent.map(|p| p.to_string()).unwrap_or_default(),
            row.alloc_percent.map(|p| p.to_string()).unwrap_or_default(),
            row.calls.map(|c| c.to_string()).unwrap_or_default(),
        ];
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');
        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }
        output
    }
}
