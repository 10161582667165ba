use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::models::Policy;

/// Root configuration structure, deserialized from `.license-warden/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// License policy rules.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// The `[policy]` table: allow/deny lists and the copyleft switch.
#[derive(Debug, Default, Deserialize)]
pub struct PolicyConfig {
    /// Identifiers that are acceptable; anything else violates.
    pub allowed: Option<Vec<String>>,
    /// Identifiers that always violate.
    pub denied: Option<Vec<String>>,
    /// Set to `false` to flag registered copyleft licenses.
    pub copyleft_ok: Option<bool>,
}

impl Config {
    /// The policy value the evaluator consumes.
    pub fn to_policy(&self) -> Policy {
        Policy {
            allowed: self.policy.allowed.clone(),
            denied: self.policy.denied.clone(),
            copyleft_ok: self.policy.copyleft_ok,
        }
    }
}

/// Load the policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--policy`
/// 2. `<project_path>/.license-warden/config.toml`
/// 3. `~/.config/license-warden/config.toml`
/// 4. Built-in default (the empty policy: no lists, copyleft unrestricted)
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".license-warden").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-warden")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
