//! The ordered signature table for license text detection.
//!
//! Order is a correctness invariant, not a style choice: earlier entries win
//! over later entries that also match. More specific patterns therefore come
//! first: BSD-4-Clause (advertising clause) before BSD-3-Clause ("neither
//! the name" clause) before the generic BSD preamble; AGPL and LGPL before
//! GPL, whose phrase their full texts embed; `-or-later` grant language
//! before the bare version patterns.
//!
//! Ordering alone cannot resolve mutual containment between full license
//! documents: the GPL-3.0 body cross-references the AGPL (section 13) and
//! its appendix carries "any later version"; the MPL-2.0 body names all
//! three GNU licenses "or any later versions" (section 1.12). Two measures
//! keep those from misclassifying:
//!
//! - title signatures anchored to the start of the document catch the
//!   canonical full texts before any body scan runs;
//! - grant signatures use bounded gaps between the license name, the
//!   version, and the later-version language, so the grant phrasing must
//!   appear as one notice rather than as words scattered across a document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{EngineError, EngineResult};
use crate::models::Confidence;
use crate::registry::{ALIASES, CANONICAL_IDS};

/// One text signature: pattern source, target identifier, and the
/// confidence a match carries.
struct Signature {
    pattern: &'static str,
    license_id: &'static str,
    confidence: Confidence,
}

// All patterns are case-insensitive; `(?s)` lets gaps cross line breaks, and
// `\s+` between words tolerates wrapped license names.
const SIGNATURES: &[Signature] = &[
    Signature {
        pattern: r"(?is)redistribution and use in source and binary forms.*all advertising materials mentioning features",
        license_id: "BSD-4-Clause",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)redistribution and use in source and binary forms.*neither the name",
        license_id: "BSD-3-Clause",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)redistribution and use in source and binary forms",
        license_id: "BSD-2-Clause",
        confidence: Confidence::Medium,
    },
    // Title signatures: the canonical full documents open with their title
    // line, possibly centered with whitespace. These must run before every
    // body scan below.
    Signature {
        pattern: r"(?is)\A\s{0,80}gnu\s+affero\s+general\s+public\s+license\s*,?\s*version\s+3",
        license_id: "AGPL-3.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)\A\s{0,80}gnu\s+lesser\s+general\s+public\s+license\s*,?\s*version\s+2\.1",
        license_id: "LGPL-2.1-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)\A\s{0,80}gnu\s+lesser\s+general\s+public\s+license\s*,?\s*version\s+3",
        license_id: "LGPL-3.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)\A\s{0,80}gnu\s+general\s+public\s+license\s*,?\s*version\s+2",
        license_id: "GPL-2.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)\A\s{0,80}gnu\s+general\s+public\s+license\s*,?\s*version\s+3",
        license_id: "GPL-3.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)\A\s{0,80}mozilla\s+public\s+license\s*,?\s*(?:version|v\.?)\s*2\.0",
        license_id: "MPL-2.0",
        confidence: Confidence::High,
    },
    // Grant signatures: one licensing notice, with bounded gaps so the
    // name/version/later-version words must belong together.
    Signature {
        pattern: r"(?is)gnu\s+affero\s+general\s+public\s+license.{0,120}?version\s+3.{0,80}?(?:any\s+later\s+version|or\s+later)",
        license_id: "AGPL-3.0-or-later",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+affero\s+general\s+public\s+license",
        license_id: "AGPL-3.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+lesser\s+general\s+public\s+license.{0,120}?version\s+2\.1.{0,80}?(?:any\s+later\s+version|or\s+later)",
        license_id: "LGPL-2.1-or-later",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+lesser\s+general\s+public\s+license.{0,120}?version\s+2\.1",
        license_id: "LGPL-2.1-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+lesser\s+general\s+public\s+license.{0,200}?(?:any\s+later\s+version|or\s+later)",
        license_id: "LGPL-3.0-or-later",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+lesser\s+general\s+public\s+license",
        license_id: "LGPL-3.0-only",
        confidence: Confidence::Medium,
    },
    Signature {
        pattern: r"(?is)gnu\s+general\s+public\s+license.{0,120}?version\s+2.{0,80}?(?:any\s+later\s+version|or\s+later)",
        license_id: "GPL-2.0-or-later",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+general\s+public\s+license.{0,120}?version\s+2",
        license_id: "GPL-2.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+general\s+public\s+license.{0,120}?version\s+3.{0,80}?(?:any\s+later\s+version|or\s+later)",
        license_id: "GPL-3.0-or-later",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+general\s+public\s+license.{0,120}?version\s+3",
        license_id: "GPL-3.0-only",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)gnu\s+general\s+public\s+license",
        license_id: "GPL-3.0-only",
        confidence: Confidence::Medium,
    },
    Signature {
        pattern: r"(?is)apache\s+license.*version\s+2\.0",
        license_id: "Apache-2.0",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)permission is hereby granted, free of charge.*without restriction",
        license_id: "MIT",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)permission to use, copy, modify, and(?:/or)? distribute this software.*with or without fee",
        license_id: "ISC",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)mozilla\s+public\s+license.{0,80}?(?:version|v\.?)\s*2\.0",
        license_id: "MPL-2.0",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)eclipse\s+public\s+license.{0,80}?(?:version|v)\s*2\.0",
        license_id: "EPL-2.0",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)eclipse\s+public\s+license.{0,80}?(?:version|v)\s*1\.0",
        license_id: "EPL-1.0",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?i)this is free and unencumbered software released into the public domain",
        license_id: "Unlicense",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?i)cc0 1\.0 universal",
        license_id: "CC0-1.0",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?i)do what the fuck you want to public license",
        license_id: "WTFPL",
        confidence: Confidence::High,
    },
    Signature {
        pattern: r"(?is)this software is provided 'as-is'.*altered source versions must be plainly marked",
        license_id: "Zlib",
        confidence: Confidence::High,
    },
];

/// A compiled signature, ready to run against text.
pub struct CompiledSignature {
    pub regex: Regex,
    pub license_id: &'static str,
    pub confidence: Confidence,
}

/// All compiled pattern tables used by text detection.
pub struct Tables {
    /// Signatures in table order (order is load-bearing).
    pub signatures: Vec<CompiledSignature>,
    /// Whole-word matchers for canonical identifiers (fallback scan).
    pub canonical_tokens: Vec<(Regex, &'static str)>,
    /// Whole-word matchers for alias keys, paired with their canonical id.
    pub alias_tokens: Vec<(Regex, &'static str)>,
}

static TABLES: Lazy<Result<Tables, regex::Error>> = Lazy::new(build_tables);

fn build_tables() -> Result<Tables, regex::Error> {
    let mut signatures = Vec::with_capacity(SIGNATURES.len());
    for sig in SIGNATURES {
        signatures.push(CompiledSignature {
            regex: Regex::new(sig.pattern)?,
            license_id: sig.license_id,
            confidence: sig.confidence,
        });
    }

    let mut canonical_tokens = Vec::with_capacity(CANONICAL_IDS.len());
    for id in CANONICAL_IDS {
        canonical_tokens.push((word_matcher(id)?, *id));
    }

    let mut alias_tokens = Vec::with_capacity(ALIASES.len());
    for (alias, canonical) in ALIASES {
        alias_tokens.push((word_matcher(alias)?, *canonical));
    }

    Ok(Tables {
        signatures,
        canonical_tokens,
        alias_tokens,
    })
}

fn word_matcher(token: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token)))
}

/// Access the compiled tables, converting a pattern compile failure into the
/// internal error kind instead of panicking.
pub fn tables() -> EngineResult<&'static Tables> {
    TABLES
        .as_ref()
        .map_err(|e| EngineError::Internal(format!("malformed signature pattern: {e}")))
}
