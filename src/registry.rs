//! Static license reference data: the canonical identifier registry, the
//! alias table, and the copyleft / attribution sets.
//!
//! All tables are process-wide, read-only, and built once, so they are safe
//! for concurrent reads without locking.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Closed set of canonical SPDX identifiers, in registry casing.
pub const CANONICAL_IDS: &[&str] = &[
    "MIT",
    "MIT-0",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-4-Clause",
    "ISC",
    "0BSD",
    "Unlicense",
    "Zlib",
    "CC0-1.0",
    "WTFPL",
    "Artistic-2.0",
    "Python-2.0",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MPL-2.0",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.2",
    "CDDL-1.0",
];

/// Copyleft licenses: derivative works must carry the same or compatible
/// terms.
const COPYLEFT_IDS: &[&str] = &[
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MPL-2.0",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.2",
    "CDDL-1.0",
];

/// Licenses whose terms require preserving a copyright/attribution notice.
/// Public-domain-equivalent grants (0BSD, MIT-0, Unlicense, CC0, WTFPL) are
/// deliberately absent.
const ATTRIBUTION_IDS: &[&str] = &[
    "MIT",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-4-Clause",
    "ISC",
    "Zlib",
    "Artistic-2.0",
    "Python-2.0",
    "MPL-2.0",
    "EPL-1.0",
    "EPL-2.0",
];

/// Free-form license names mapped to canonical identifiers. Keys are matched
/// exactly (as authored) during normalization; every value must be a member
/// of [`CANONICAL_IDS`] (checked by test).
pub const ALIASES: &[(&str, &str)] = &[
    ("MIT License", "MIT"),
    ("The MIT License", "MIT"),
    ("Apache 2.0", "Apache-2.0"),
    ("Apache License 2.0", "Apache-2.0"),
    ("Apache License, Version 2.0", "Apache-2.0"),
    ("BSD", "BSD-3-Clause"),
    ("BSD License", "BSD-3-Clause"),
    ("BSD 2-Clause", "BSD-2-Clause"),
    ("Simplified BSD", "BSD-2-Clause"),
    ("BSD 3-Clause", "BSD-3-Clause"),
    ("New BSD", "BSD-3-Clause"),
    ("Modified BSD", "BSD-3-Clause"),
    ("ISC License", "ISC"),
    ("zlib License", "Zlib"),
    ("CC0", "CC0-1.0"),
    ("Public Domain", "CC0-1.0"),
    // SPDX deprecated the suffix-less GNU family ids in favour of -only.
    ("GPL-2.0", "GPL-2.0-only"),
    ("GPL-3.0", "GPL-3.0-only"),
    ("AGPL-3.0", "AGPL-3.0-only"),
    ("LGPL-2.1", "LGPL-2.1-only"),
    ("LGPL-3.0", "LGPL-3.0-only"),
    ("GPL v2", "GPL-2.0-only"),
    ("GPLv2", "GPL-2.0-only"),
    ("GNU GPL v2", "GPL-2.0-only"),
    ("GNU General Public License v2", "GPL-2.0-only"),
    ("GPL v3", "GPL-3.0-only"),
    ("GPLv3", "GPL-3.0-only"),
    ("GNU GPL v3", "GPL-3.0-only"),
    ("GNU General Public License v3", "GPL-3.0-only"),
    ("AGPL v3", "AGPL-3.0-only"),
    ("AGPLv3", "AGPL-3.0-only"),
    ("GNU AGPL v3", "AGPL-3.0-only"),
    ("LGPL v2.1", "LGPL-2.1-only"),
    ("LGPLv2.1", "LGPL-2.1-only"),
    ("GNU LGPL v2.1", "LGPL-2.1-only"),
    ("LGPL v3", "LGPL-3.0-only"),
    ("LGPLv3", "LGPL-3.0-only"),
    ("GNU LGPL v3", "LGPL-3.0-only"),
    ("Mozilla Public License 2.0", "MPL-2.0"),
    ("MPL 2.0", "MPL-2.0"),
    ("MPLv2", "MPL-2.0"),
    ("Eclipse Public License 2.0", "EPL-2.0"),
    ("Eclipse Public License 1.0", "EPL-1.0"),
];

static ALIAS_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ALIASES.iter().copied().collect());

/// Normalize a raw license string to its canonical identifier.
///
/// Resolution order: exact alias-table match, then case-insensitive match
/// against the canonical registry (returning registry casing), then
/// pass-through unchanged. Idempotent.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(canonical) = ALIAS_MAP.get(trimmed) {
        return canonical.to_string();
    }
    for id in CANONICAL_IDS {
        if id.eq_ignore_ascii_case(trimmed) {
            return id.to_string();
        }
    }
    trimmed.to_string()
}

/// Whether `id` names a member of the canonical registry. Case-insensitive
/// and variant-aware, so the deprecated `GPL-3.0` spelling still counts.
pub fn is_registered(id: &str) -> bool {
    CANONICAL_IDS.iter().any(|c| variants_equal(c, id))
}

/// Whether `id` names a registered copyleft license.
pub fn is_copyleft(id: &str) -> bool {
    COPYLEFT_IDS.iter().any(|c| variants_equal(c, id))
}

/// Whether `id` names a license that requires attribution.
pub fn requires_attribution(id: &str) -> bool {
    ATTRIBUTION_IDS.iter().any(|c| variants_equal(c, id))
}

/// Identifier equality for policy matching: case-insensitive, with
/// GPL/LGPL/AGPL family variants considered equal.
///
/// For those families, `X-only` == `X`, and `X-or-later` == `X+`. A policy
/// written as `GPL-3.0` therefore matches a detected `GPL-3.0-only`.
pub fn variants_equal(a: &str, b: &str) -> bool {
    variant_key(a) == variant_key(b)
}

/// Reduce an identifier to its comparison key: lowercase, with GNU-family
/// suffixes folded (`-only` stripped, `-or-later` rewritten as `+`).
fn variant_key(id: &str) -> String {
    let lower = id.trim().to_ascii_lowercase();
    if !is_gnu_family(&lower) {
        return lower;
    }
    if let Some(base) = lower.strip_suffix("-only") {
        return base.to_string();
    }
    if let Some(base) = lower.strip_suffix("-or-later") {
        return format!("{base}+");
    }
    lower
}

fn is_gnu_family(lower: &str) -> bool {
    lower.starts_with("gpl-") || lower.starts_with("lgpl-") || lower.starts_with("agpl-")
}
