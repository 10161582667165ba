//! NOTICE document rendering: group detections that require attribution by
//! license, one section per license, components listed beneath.

use std::collections::BTreeMap;

use crate::models::{DetectedLicense, UNKNOWN_LICENSE};
use crate::registry;

/// Render a plain-text NOTICE document for `detected`.
///
/// Components under attribution-requiring licenses are grouped per license;
/// components whose license could not be determined land in a trailing
/// review section.
pub fn render(detected: &[DetectedLicense]) -> String {
    let mut by_license: BTreeMap<&str, Vec<&DetectedLicense>> = BTreeMap::new();
    let mut unknown: Vec<&DetectedLicense> = Vec::new();

    for d in detected {
        if d.license_id == UNKNOWN_LICENSE {
            unknown.push(d);
        } else if registry::requires_attribution(&d.license_id) {
            by_license.entry(d.license_id.as_str()).or_default().push(d);
        }
    }

    let mut out = String::from("THIRD-PARTY NOTICES\n");
    out.push_str("===================\n");

    if by_license.is_empty() && unknown.is_empty() {
        out.push_str("\nNo components requiring attribution were detected.\n");
        return out;
    }

    for (license, components) in &by_license {
        out.push_str(&format!(
            "\n{} licensed under {}\n",
            plural(components.len()),
            license
        ));
        for c in components {
            out.push_str(&format!("  - {}\n", component_line(c)));
        }
    }

    if !unknown.is_empty() {
        out.push_str("\nComponents requiring manual license review\n");
        for c in &unknown {
            out.push_str(&format!("  - {}\n", component_line(c)));
        }
    }

    out
}

fn component_line(d: &DetectedLicense) -> String {
    match &d.version {
        Some(v) => format!("{} {}", d.name, v),
        None => d.name.clone(),
    }
}

fn plural(count: usize) -> String {
    if count == 1 {
        "1 component".to_string()
    } else {
        format!("{count} components")
    }
}
