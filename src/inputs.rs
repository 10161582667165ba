//! Build a detection input, either from a JSON document supplied via
//! `--input` or by scanning a project directory for dependency manifests and
//! license-like files.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::{DependencyInput, DetectInput, FileInput};

/// Filenames treated as license-like when scanning a project.
const LICENSE_FILE_PREFIXES: &[&str] = &["LICENSE", "LICENCE", "COPYING", "NOTICE"];

/// Gather a detect input: `input_override` (a JSON document) wins; otherwise
/// scan `path`. A scan that finds nothing yields an empty input; the core
/// precondition turns that into the invalid-input failure.
pub fn gather(path: &Path, input_override: Option<&Path>) -> Result<DetectInput> {
    if let Some(file) = input_override {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("reading input document {}", file.display()))?;
        let input: DetectInput = serde_json::from_str(&content)
            .with_context(|| format!("parsing input document {}", file.display()))?;
        return Ok(input);
    }

    let mut dependencies = Vec::new();
    let mut files = Vec::new();

    let lock = path.join("package-lock.json");
    if lock.exists() {
        if let Ok(parsed) = parse_package_lock_json(&lock) {
            dependencies.extend(parsed);
        }
    }

    if let Some(project) = project_manifest_dependency(path) {
        dependencies.push(project);
    }

    files.extend(license_files(path));

    Ok(DetectInput {
        dependencies: (!dependencies.is_empty()).then_some(dependencies),
        files: (!files.is_empty()).then_some(files),
    })
}

/// Parse `package-lock.json` v2/v3 (the `packages` map), carrying the lock
/// entry's `license` field when present.
fn parse_package_lock_json(lock_path: &Path) -> Result<Vec<DependencyInput>> {
    let content = std::fs::read_to_string(lock_path)?;
    let json: Value = serde_json::from_str(&content)?;
    let mut deps = Vec::new();

    if let Some(packages) = json.get("packages").and_then(|v| v.as_object()) {
        for (pkg_path, info) in packages {
            // Skip the root entry (empty string key)
            if pkg_path.is_empty() {
                continue;
            }

            // Derive package name from path: "node_modules/foo" → "foo",
            // "node_modules/@scope/foo" → "@scope/foo"
            let name = pkg_path
                .strip_prefix("node_modules/")
                .unwrap_or(pkg_path)
                .to_string();

            let version = info
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let license_id = info
                .get("license")
                .and_then(|v| v.as_str())
                .map(str::to_string);

            deps.push(DependencyInput {
                name,
                version,
                license_id,
                license_text: None,
            });
        }
    }

    Ok(deps)
}

/// A dependency input for the project itself, from the root `package.json`
/// or `Cargo.toml` license field.
fn project_manifest_dependency(path: &Path) -> Option<DependencyInput> {
    let pkg = path.join("package.json");
    if pkg.exists() {
        if let Ok(content) = std::fs::read_to_string(&pkg) {
            if let Ok(json) = serde_json::from_str::<Value>(&content) {
                let license = json.get("license").and_then(|v| v.as_str())?;
                let name = json
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("project")
                    .to_string();
                let version = json
                    .get("version")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                return Some(DependencyInput {
                    name,
                    version,
                    license_id: Some(license.to_string()),
                    license_text: None,
                });
            }
        }
    }

    let cargo = path.join("Cargo.toml");
    if cargo.exists() {
        if let Ok(content) = std::fs::read_to_string(&cargo) {
            if let Ok(manifest) = toml::from_str::<toml::Value>(&content) {
                let package = manifest.get("package")?;
                let license = package.get("license").and_then(|v| v.as_str())?;
                let name = package
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("project")
                    .to_string();
                let version = package
                    .get("version")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                return Some(DependencyInput {
                    name,
                    version,
                    license_id: Some(license.to_string()),
                    license_text: None,
                });
            }
        }
    }

    None
}

/// Collect license-like files (LICENSE*, COPYING*, NOTICE*) from the
/// project root.
fn license_files(path: &Path) -> Vec<FileInput> {
    let mut files = Vec::new();
    let Ok(entries) = std::fs::read_dir(path) else {
        return files;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !is_license_filename(name) {
            continue;
        }
        if let Ok(content) = std::fs::read_to_string(entry.path()) {
            if !content.trim().is_empty() {
                files.push(FileInput {
                    filename: name.to_string(),
                    content,
                });
            }
        }
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    files
}

fn is_license_filename(name: &str) -> bool {
    let upper = name.to_uppercase();
    LICENSE_FILE_PREFIXES.iter().any(|p| upper.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_package_lock_json() {
        let json = r#"{
  "name": "my-app",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "my-app", "version": "1.0.0" },
    "node_modules/express": {
      "version": "4.18.2",
      "license": "MIT"
    },
    "node_modules/@scope/pkg": {
      "version": "2.0.0"
    }
  }
}"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", json).unwrap();
        let deps = parse_package_lock_json(f.path()).unwrap();
        assert_eq!(deps.len(), 2);
        let express = deps.iter().find(|d| d.name == "express").unwrap();
        assert_eq!(express.license_id.as_deref(), Some("MIT"));
        assert!(deps.iter().any(|d| d.name == "@scope/pkg"));
    }

    #[test]
    fn test_gather_from_input_document() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"dependencies": [{{"name": "lodash", "license_id": "MIT License"}}]}}"#
        )
        .unwrap();
        let input = gather(Path::new("."), Some(f.path())).unwrap();
        let deps = input.dependencies.unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "lodash");
    }

    #[test]
    fn test_scan_picks_up_manifest_and_license_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nlicense = \"MIT\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("LICENSE"),
            "Permission is hereby granted, free of charge, to deal in the Software \
             without restriction.",
        )
        .unwrap();

        let input = gather(dir.path(), None).unwrap();
        let deps = input.dependencies.unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "demo");
        assert_eq!(deps[0].license_id.as_deref(), Some("MIT"));
        let files = input.files.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "LICENSE");
    }

    #[test]
    fn test_scan_of_empty_dir_yields_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = gather(dir.path(), None).unwrap();
        assert!(input.dependencies.is_none());
        assert!(input.files.is_none());
    }
}
