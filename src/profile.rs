//! GHC profiling report parser
//!
//! Parses the time/allocation report a profiled build writes when run with
//! `+RTS -p` (the `<program>.prof` file the benchmark harness copies into the
//! results directory). The format is line-oriented: a tab-indented header
//! block with the run date and totals, a flat summary table, then the
//! cost-centre tree proper, one entry per line, nested one space per level.
//!
//! Parsing is all-or-nothing: either the full tree materializes or a
//! [`ParseError`] describes the first offending line. No partial trees.

use thiserror::Error;

/// Banner every report header carries on its first non-blank line.
const REPORT_BANNER: &str = "Time and Allocation Profiling Report";

/// Errors for profile report parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: expected profiling report header, found {found:?}")]
    MissingHeader { line: usize, found: String },

    #[error("no cost-centre tree section found (expected a COST CENTRE header with no. and entries columns)")]
    MissingTree,

    #[error("line {line}: cost-centre tree section has no entries")]
    EmptyTree { line: usize },

    #[error("line {line}: expected at least {expected} columns in cost-centre entry, found {found}")]
    TruncatedEntry {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: expected numeric {column} field, found {found:?}")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        found: String,
    },

    #[error("line {line}: entry at depth {depth} has no parent at depth {}", depth.saturating_sub(1))]
    BadIndent { line: usize, depth: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// One entry in the cost-centre tree
#[derive(Debug, Clone, PartialEq)]
pub struct CostCentreNode {
    /// Annotation label from the profiled program (`SCC` pragma name)
    pub name: String,
    /// Module the cost centre lives in
    pub module: String,
    /// Source span column (absent in reports from older toolchains)
    pub src: Option<String>,
    /// The report's `no.` column, unique per entry
    pub id: u64,
    /// Number of times the cost centre was entered
    pub calls: u64,
    /// Individual time share, percent
    pub time_pct: f64,
    /// Individual allocation share, percent
    pub alloc_pct: f64,
    /// Inherited time share (this entry plus children), percent
    pub inherited_time_pct: f64,
    /// Inherited allocation share, percent
    pub inherited_alloc_pct: f64,
    /// Child cost centres, in report order
    pub children: Vec<CostCentreNode>,
}

/// A fully parsed profiling report
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    /// Header line, verbatim (carries the run date)
    pub title: String,
    /// Profiled command line, verbatim, when the header carries one
    pub command: Option<String>,
    /// `total time` header value in seconds, when present
    pub total_time_secs: Option<f64>,
    /// `total alloc` header value in bytes, when present
    pub total_alloc_bytes: Option<u64>,
    /// Cost-centre tree roots (a single MAIN entry in practice)
    pub roots: Vec<CostCentreNode>,
}

impl ProfileReport {
    /// Iterate every node in the tree, pre-order depth-first, following the
    /// stored child order. This is the traversal the extractor's tie-break
    /// rule is defined over.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.roots.iter().rev().collect(),
        }
    }
}

/// Pre-order depth-first iterator over a report's cost-centre nodes
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a CostCentreNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a CostCentreNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Parse the full text of a profiling report.
///
/// Pure function over its input; returns the first structural problem as a
/// [`ParseError`] and never a partial tree.
pub fn parse(input: &str) -> Result<ProfileReport> {
    let lines: Vec<&str> = input.lines().collect();

    let (header_idx, title) = lines
        .iter()
        .enumerate()
        .find(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i, l.trim()))
        .ok_or_else(|| ParseError::MissingHeader {
            line: 1,
            found: String::new(),
        })?;
    if !title.contains(REPORT_BANNER) {
        return Err(ParseError::MissingHeader {
            line: header_idx + 1,
            found: title.to_string(),
        });
    }

    let tree_header_idx = lines
        .iter()
        .position(|l| {
            let t = l.trim_start();
            t.starts_with("COST CENTRE") && t.contains("no.") && t.contains("entries")
        })
        .ok_or(ParseError::MissingTree)?;
    let has_src = lines[tree_header_idx].contains("SRC");

    // The tree header can double as the first non-blank line in degenerate
    // input, so the slice bounds need the checked lookup.
    let command = lines
        .get(header_idx + 1..tree_header_idx)
        .unwrap_or_default()
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .filter(|l| !l.starts_with("total time") && !l.starts_with("total alloc"))
        .map(str::to_string);

    let mut total_time_secs = None;
    let mut total_alloc_bytes = None;
    for (idx, raw) in lines[..tree_header_idx].iter().enumerate() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("total time") {
            total_time_secs = Some(parse_total_f64(idx + 1, "total time", trimmed)?);
        } else if trimmed.starts_with("total alloc") {
            total_alloc_bytes = Some(parse_total_u64(idx + 1, "total alloc", trimmed)?);
        }
    }

    let roots = parse_tree(&lines, tree_header_idx, has_src)?;

    Ok(ProfileReport {
        title: title.to_string(),
        command,
        total_time_secs,
        total_alloc_bytes,
        roots,
    })
}

/// Parse the entry rows following the tree header into a forest.
fn parse_tree(lines: &[&str], tree_header_idx: usize, has_src: bool) -> Result<Vec<CostCentreNode>> {
    let mut roots: Vec<CostCentreNode> = Vec::new();
    let mut stack: Vec<(usize, CostCentreNode)> = Vec::new();
    let mut saw_entry = false;

    for (offset, raw) in lines[tree_header_idx + 1..].iter().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line_no = tree_header_idx + 2 + offset;
        let (depth, node) = parse_entry(line_no, raw, has_src)?;
        saw_entry = true;

        // Attach completed subtrees until the stack top is this entry's parent.
        while let Some((top_depth, done)) = stack.pop() {
            if top_depth < depth {
                stack.push((top_depth, done));
                break;
            }
            match stack.last_mut() {
                Some((_, parent)) => parent.children.push(done),
                None => roots.push(done),
            }
        }
        match stack.last() {
            None if depth > 0 => return Err(ParseError::BadIndent { line: line_no, depth }),
            Some((parent_depth, _)) if depth > parent_depth + 1 => {
                return Err(ParseError::BadIndent { line: line_no, depth });
            }
            _ => {}
        }
        stack.push((depth, node));
    }

    if !saw_entry {
        return Err(ParseError::EmptyTree {
            line: tree_header_idx + 1,
        });
    }

    while let Some((_, done)) = stack.pop() {
        match stack.last_mut() {
            Some((_, parent)) => parent.children.push(done),
            None => roots.push(done),
        }
    }
    Ok(roots)
}

/// Parse a single entry row into its depth and node.
///
/// The profiler nests entries one space per level; columns are
/// whitespace-separated. Rows from `-P` runs carry trailing ticks/bytes
/// columns, which are ignored.
fn parse_entry(line_no: usize, raw: &str, has_src: bool) -> Result<(usize, CostCentreNode)> {
    let depth = raw.len() - raw.trim_start_matches(' ').len();
    let fields: Vec<&str> = raw.split_whitespace().collect();
    let expected = if has_src { 9 } else { 8 };
    if fields.len() < expected {
        return Err(ParseError::TruncatedEntry {
            line: line_no,
            expected,
            found: fields.len(),
        });
    }

    let src_width = usize::from(has_src);
    let base = 2 + src_width;
    let node = CostCentreNode {
        name: fields[0].to_string(),
        module: fields[1].to_string(),
        src: has_src.then(|| fields[2].to_string()),
        id: parse_u64_field(line_no, "no.", fields[base])?,
        calls: parse_u64_field(line_no, "entries", fields[base + 1])?,
        time_pct: parse_f64_field(line_no, "%time", fields[base + 2])?,
        alloc_pct: parse_f64_field(line_no, "%alloc", fields[base + 3])?,
        inherited_time_pct: parse_f64_field(line_no, "inherited %time", fields[base + 4])?,
        inherited_alloc_pct: parse_f64_field(line_no, "inherited %alloc", fields[base + 5])?,
        children: Vec::new(),
    };
    Ok((depth, node))
}

fn parse_u64_field(line: usize, column: &'static str, field: &str) -> Result<u64> {
    // The profiler comma-groups large counts.
    field
        .replace(',', "")
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            line,
            column,
            found: field.to_string(),
        })
}

fn parse_f64_field(line: usize, column: &'static str, field: &str) -> Result<f64> {
    field.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        column,
        found: field.to_string(),
    })
}

/// Parse the value of a `total time = 1.95 secs (...)` header line.
fn parse_total_f64(line: usize, column: &'static str, trimmed: &str) -> Result<f64> {
    let token = total_value_token(trimmed);
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        column,
        found: token.to_string(),
    })
}

/// Parse the value of a `total alloc = 2,837,744,528 bytes (...)` header line.
fn parse_total_u64(line: usize, column: &'static str, trimmed: &str) -> Result<u64> {
    let token = total_value_token(trimmed);
    token
        .replace(',', "")
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            line,
            column,
            found: token.to_string(),
        })
}

fn total_value_token(trimmed: &str) -> &str {
    trimmed
        .split('=')
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("")
}
