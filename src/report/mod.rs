//! Report renderers for detection and compatibility results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects
//!   `--verbose` / `--quiet`.
//!
//! JSON output is plain `serde_json::to_string_pretty`: over the report
//! struct directly for `detect` runs, over [`check_document`] for `check`
//! runs.

pub mod terminal;

use serde_json::{json, Value};

use crate::models::{CompatReport, DetectionReport};

/// Combined JSON document for a `check` run: detections plus the policy
/// verdict, with detection and evaluation warnings merged into one list.
pub fn check_document(detection: &DetectionReport, compat: &CompatReport) -> Value {
    let warnings: Vec<&String> = detection
        .warnings
        .iter()
        .chain(compat.warnings.iter())
        .collect();
    json!({
        "detected": detection.detected,
        "compatible": compat.compatible,
        "violations": compat.violations,
        "warnings": warnings,
    })
}
