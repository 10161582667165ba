//! Policy evaluation: an ordered per-license rule chain with first-match-wins
//! semantics. A license produces at most one violation; warnings are advisory
//! and never affect the verdict.

use crate::error::{EngineError, EngineResult};
use crate::models::{CompatReport, LicenseInfo, Policy, Violation, UNKNOWN_LICENSE};
use crate::registry;

/// Evaluate `licenses` against `policy`.
///
/// Rule order per license: unknown identifier, deny-list, allow-list,
/// copyleft restriction, attribution advisory. The first applicable rule is
/// terminal for that license, so an identifier that is both denied and
/// copyleft reports only the deny reason.
pub fn evaluate(licenses: &[LicenseInfo], policy: &Policy) -> EngineResult<CompatReport> {
    if licenses.is_empty() {
        return Err(EngineError::InvalidInput(
            "`licenses` must not be empty".into(),
        ));
    }
    for lic in licenses {
        if lic.license_id.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "license `license_id` must not be blank".into(),
            ));
        }
    }

    // Empty lists count as not configured.
    let allowed = policy.allowed.as_deref().filter(|l| !l.is_empty());
    let denied = policy.denied.as_deref().filter(|l| !l.is_empty());

    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    for lic in licenses {
        let id = lic.license_id.trim();
        let name = lic.name.clone().unwrap_or_else(|| id.to_string());

        // Rule 1: unverifiable identifier. With an allow-list in force an
        // unknown license can never be proven allowed.
        if id.eq_ignore_ascii_case(UNKNOWN_LICENSE) {
            if allowed.is_some() {
                violations.push(Violation {
                    name,
                    license_id: id.to_string(),
                    reason: "license is unknown and cannot be verified against the allowed list"
                        .into(),
                });
            } else {
                warnings.push(format!(
                    "license for {name} is unknown; manual review recommended"
                ));
            }
            continue;
        }

        // Rule 2: deny-list. Evaluated before the allow-list, so an id on
        // both lists violates.
        if let Some(denied) = denied {
            if list_matches(denied, id) {
                violations.push(Violation {
                    name,
                    license_id: id.to_string(),
                    reason: format!("license {id} is on the denied list"),
                });
                continue;
            }
        }

        // Rule 3: allow-list.
        if let Some(allowed) = allowed {
            if !list_matches(allowed, id) {
                violations.push(Violation {
                    name,
                    license_id: id.to_string(),
                    reason: format!("license {id} is not in the allowed list"),
                });
                continue;
            }
        }

        // Rule 4: copyleft restriction, only when explicitly disallowed.
        if policy.copyleft_ok == Some(false) && registry::is_copyleft(id) {
            violations.push(Violation {
                name,
                license_id: id.to_string(),
                reason: format!("license {id} is a copyleft license, which policy does not permit"),
            });
            continue;
        }

        // Rule 5: attribution advisory. Non-blocking.
        if registry::requires_attribution(id) {
            warnings.push(format!(
                "license {id} requires attribution; include a notice entry for {name}"
            ));
        }
    }

    Ok(CompatReport {
        compatible: violations.is_empty(),
        violations,
        warnings,
    })
}

/// List membership: case-insensitive, with GNU family variants equal
/// (`GPL-3.0` matches `GPL-3.0-only`, `GPL-3.0-or-later` matches `GPL-3.0+`).
fn list_matches(list: &[String], id: &str) -> bool {
    list.iter().any(|entry| registry::variants_equal(entry, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lic(name: &str, id: &str) -> LicenseInfo {
        LicenseInfo {
            name: Some(name.into()),
            license_id: id.into(),
        }
    }

    fn policy(
        allowed: Option<&[&str]>,
        denied: Option<&[&str]>,
        copyleft_ok: Option<bool>,
    ) -> Policy {
        let to_vec = |l: &[&str]| l.iter().map(|s| s.to_string()).collect();
        Policy {
            allowed: allowed.map(to_vec),
            denied: denied.map(to_vec),
            copyleft_ok,
        }
    }

    #[test]
    fn test_empty_licenses_is_invalid_input() {
        let err = evaluate(&[], &Policy::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_license_id_is_invalid_input() {
        let err = evaluate(&[lic("x", "  ")], &Policy::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_policy_is_always_compatible() {
        let report = evaluate(
            &[lic("a", "MIT"), lic("b", "GPL-3.0-only")],
            &Policy::default(),
        )
        .unwrap();
        assert!(report.compatible);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_deny_list_flags_match() {
        let report = evaluate(
            &[lic("gpl-lib", "GPL-3.0-only"), lic("ok-lib", "MIT")],
            &policy(None, Some(&["GPL-3.0-only"]), None),
        )
        .unwrap();
        assert!(!report.compatible);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].name, "gpl-lib");
        assert!(report.violations[0].reason.contains("denied"));
    }

    #[test]
    fn test_deny_precedes_allow() {
        // On both lists: the deny rule fires first.
        let report = evaluate(
            &[lic("lib", "MIT")],
            &policy(Some(&["MIT"]), Some(&["MIT"]), None),
        )
        .unwrap();
        assert!(!report.compatible);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].reason.contains("denied"));
    }

    #[test]
    fn test_allow_list_flags_non_members() {
        let report = evaluate(
            &[lic("a", "MIT"), lic("b", "MPL-2.0")],
            &policy(Some(&["MIT", "Apache-2.0"]), None, None),
        )
        .unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].license_id, "MPL-2.0");
        assert!(report.violations[0].reason.contains("not in the allowed list"));
    }

    #[test]
    fn test_family_variant_matching_in_lists() {
        // Policy spelled GPL-3.0 must flag a detected GPL-3.0-only.
        let report = evaluate(
            &[lic("gpl-lib", "GPL-3.0-only")],
            &policy(None, Some(&["GPL-3.0"]), None),
        )
        .unwrap();
        assert!(!report.compatible);

        // And the reverse spelling in the allow-list must match.
        let report = evaluate(
            &[lic("gpl-lib", "GPL-3.0")],
            &policy(Some(&["GPL-3.0-only"]), None, None),
        )
        .unwrap();
        assert!(report.compatible);
    }

    #[test]
    fn test_copyleft_flag() {
        let licenses = [lic("a", "MIT"), lic("b", "GPL-3.0-only")];

        let report = evaluate(&licenses, &policy(None, None, Some(false))).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].license_id, "GPL-3.0-only");
        assert!(report.violations[0].reason.contains("copyleft"));

        let report = evaluate(&licenses, &policy(None, None, Some(true))).unwrap();
        assert!(report.violations.is_empty());

        let report = evaluate(&licenses, &policy(None, None, None)).unwrap();
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_copyleft_flag_is_variant_aware() {
        let report = evaluate(
            &[lic("gpl-lib", "GPL-3.0")],
            &policy(None, None, Some(false)),
        )
        .unwrap();
        assert!(!report.compatible);
    }

    #[test]
    fn test_unknown_with_allow_list_is_violation() {
        let report = evaluate(
            &[lic("mystery", "UNKNOWN")],
            &policy(Some(&["MIT"]), None, None),
        )
        .unwrap();
        assert!(!report.compatible);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].reason.contains("cannot be verified"));
    }

    #[test]
    fn test_unknown_without_allow_list_is_warning_only() {
        let report = evaluate(
            &[lic("mystery", "UNKNOWN")],
            &policy(None, Some(&["GPL-3.0"]), Some(false)),
        )
        .unwrap();
        assert!(report.compatible);
        assert!(report.violations.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("manual review"));
    }

    #[test]
    fn test_denied_copyleft_reports_only_deny_reason() {
        let report = evaluate(
            &[lic("gpl-lib", "GPL-3.0-only")],
            &policy(None, Some(&["GPL-3.0"]), Some(false)),
        )
        .unwrap();
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].reason.contains("denied"));
    }

    #[test]
    fn test_attribution_warning_never_blocks() {
        let report = evaluate(&[lic("a", "MIT")], &policy(Some(&["MIT"]), None, None)).unwrap();
        assert!(report.compatible);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("attribution"));
    }

    #[test]
    fn test_empty_configured_lists_count_as_absent() {
        let report = evaluate(
            &[lic("mystery", "UNKNOWN")],
            &policy(Some(&[]), None, None),
        )
        .unwrap();
        // An empty allow-list imposes no constraint, so UNKNOWN only warns.
        assert!(report.compatible);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_name_falls_back_to_license_id() {
        let licenses = [LicenseInfo {
            name: None,
            license_id: "GPL-3.0-only".into(),
        }];
        let report = evaluate(&licenses, &policy(None, Some(&["GPL-3.0"]), None)).unwrap();
        assert_eq!(report.violations[0].name, "GPL-3.0-only");
    }
}
