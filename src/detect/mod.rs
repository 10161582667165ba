//! License detection: normalize explicit identifiers, pattern-match free
//! text against the ordered signature table, and fall back to whole-word
//! identifier/alias scanning.

pub mod signatures;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Confidence, DetectInput, DetectedLicense, DetectionReport, LicenseSource, UNKNOWN_LICENSE,
};
use crate::registry;

/// Resolve a license for every dependency and file in `input`.
///
/// Fails with [`EngineError::InvalidInput`] before any processing when both
/// lists are missing/empty or a required string field is blank. Inputs that
/// merely lack license information are not errors: they yield `UNKNOWN`
/// records plus warnings.
pub fn detect(input: &DetectInput) -> EngineResult<DetectionReport> {
    let dependencies = input.dependencies.as_deref().unwrap_or(&[]);
    let files = input.files.as_deref().unwrap_or(&[]);

    if dependencies.is_empty() && files.is_empty() {
        return Err(EngineError::InvalidInput(
            "at least one of `dependencies` or `files` must be present and non-empty".into(),
        ));
    }
    for dep in dependencies {
        if dep.name.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "dependency `name` must not be blank".into(),
            ));
        }
    }
    for file in files {
        if file.filename.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "file `filename` must not be blank".into(),
            ));
        }
        if file.content.trim().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "file `{}` has blank content",
                file.filename
            )));
        }
    }

    let mut detected = Vec::with_capacity(dependencies.len() + files.len());
    let mut warnings = Vec::new();

    for dep in dependencies {
        let explicit_id = dep.license_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let text = dep.license_text.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let record = if let Some(raw) = explicit_id {
            let license_id = registry::normalize(raw);
            let confidence = if registry::is_registered(&license_id) {
                Confidence::High
            } else {
                Confidence::Medium
            };
            DetectedLicense {
                name: dep.name.clone(),
                version: dep.version.clone(),
                license_id,
                confidence,
                source: LicenseSource::DependencyMetadata,
            }
        } else if let Some(text) = text {
            match detect_from_text(text)? {
                Some((license_id, confidence)) => DetectedLicense {
                    name: dep.name.clone(),
                    version: dep.version.clone(),
                    license_id,
                    confidence,
                    source: LicenseSource::LicenseTextAnalysis,
                },
                None => {
                    warnings.push(format!(
                        "could not detect license for {} from provided text",
                        dep.name
                    ));
                    DetectedLicense {
                        name: dep.name.clone(),
                        version: dep.version.clone(),
                        license_id: UNKNOWN_LICENSE.into(),
                        confidence: Confidence::Low,
                        source: LicenseSource::LicenseTextAnalysis,
                    }
                }
            }
        } else {
            warnings.push(format!("no license information provided for {}", dep.name));
            DetectedLicense {
                name: dep.name.clone(),
                version: dep.version.clone(),
                license_id: UNKNOWN_LICENSE.into(),
                confidence: Confidence::Low,
                source: LicenseSource::NoData,
            }
        };

        detected.push(record);
    }

    for file in files {
        let (license_id, confidence) = match detect_from_text(&file.content)? {
            Some(found) => found,
            None => {
                warnings.push(format!(
                    "could not detect license in file {}",
                    file.filename
                ));
                (UNKNOWN_LICENSE.into(), Confidence::Low)
            }
        };
        detected.push(DetectedLicense {
            name: file.filename.clone(),
            version: None,
            license_id,
            confidence,
            source: LicenseSource::File(file.filename.clone()),
        });
    }

    Ok(DetectionReport { detected, warnings })
}

/// Run text detection: first match in the ordered signature table wins, then
/// a whole-word scan for canonical identifiers, then for alias keys. Returns
/// `None` when nothing matches.
pub fn detect_from_text(text: &str) -> EngineResult<Option<(String, Confidence)>> {
    let tables = signatures::tables()?;

    for sig in &tables.signatures {
        if sig.regex.is_match(text) {
            return Ok(Some((sig.license_id.to_string(), sig.confidence)));
        }
    }

    // Prefer the longest matching token so "GPL-3.0-or-later" in the text is
    // not reported as a shorter id it happens to contain.
    if let Some(id) = longest_token_match(&tables.canonical_tokens, text) {
        return Ok(Some((id.to_string(), Confidence::Low)));
    }
    if let Some(id) = longest_token_match(&tables.alias_tokens, text) {
        return Ok(Some((id.to_string(), Confidence::Low)));
    }

    Ok(None)
}

fn longest_token_match(
    tokens: &[(regex::Regex, &'static str)],
    text: &str,
) -> Option<&'static str> {
    tokens
        .iter()
        .filter_map(|(re, id)| re.find(text).map(|m| (m.as_str().len(), *id)))
        .max_by_key(|(len, _)| *len)
        .map(|(_, id)| id)
}
