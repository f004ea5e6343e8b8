//! Cost-centre lookup over parsed profile reports
//!
//! The benchmark sample projects mark their compiler phases with `SCC`
//! annotations; this module looks those labels up in a parsed report. The
//! tracked label list is compiled in and must stay in sync with the
//! annotations in the sample sources.

use crate::profile::{CostCentreNode, ProfileReport};

/// Cost-centre labels the benchmark harness tracks.
///
/// These must match the `SCC` annotation labels in the profiled sample
/// projects exactly. Changing the instrumentation there means updating this
/// list, and vice versa. Labels missing from a given report are reported as
/// absent, not as errors: a stale build of the samples is an expected state.
pub const TRACKED_COST_CENTRES: &[&str] = &[
    "parsing",
    "typechecking",
    "simplification",
    "codegen",
];

/// Look up each name in `names` across the whole cost-centre tree.
///
/// The output has the same length and order as `names`. For each name the
/// first matching node in pre-order depth-first traversal (stored child
/// order) is returned; names with no match anywhere in the tree pair with
/// `None`. The tie-break matters for recursive or repeated annotation sites
/// and is stable across runs, so benchmark comparisons line up.
pub fn extract<'r>(
    report: &'r ProfileReport,
    names: &[String],
) -> Vec<(String, Option<&'r CostCentreNode>)> {
    names
        .iter()
        .map(|name| (name.clone(), report.iter().find(|node| node.name == *name)))
        .collect()
}
