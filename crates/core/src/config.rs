//! Configuration registry: the user-editable list of settings files to scan.
//!
//! The value lives under the `djset.settingsFiles` key in the host's
//! configuration and is re-read on every configuration-change event.

use serde::{Deserialize, Serialize};

/// Configuration key the watcher reacts to.
pub const SETTINGS_FILES_KEY: &str = "djset.settingsFiles";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Relative paths (from each project root) of files to scan for
    /// settings declarations. Empty by default.
    pub settings_files: Vec<String>,
}

impl Config {
    /// Extracts a `Config` from a host-supplied JSON payload. Accepts both
    /// the namespaced shape `{"djset": {"settingsFiles": [...]}}` and the
    /// bare shape `{"settingsFiles": [...]}`; anything else yields the
    /// default (empty) configuration.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let section = value.get("djset").unwrap_or(value);
        serde_json::from_value(section.clone()).unwrap_or_else(|e| {
            tracing::warn!("malformed {} value, using defaults: {}", SETTINGS_FILES_KEY, e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_namespaced_payload() {
        let value = json!({"djset": {"settingsFiles": ["app/settings.py", "app/local.py"]}});
        let config = Config::from_json(&value);
        assert_eq!(
            config.settings_files,
            vec!["app/settings.py", "app/local.py"]
        );
    }

    #[test]
    fn test_bare_payload() {
        let value = json!({"settingsFiles": ["settings.py"]});
        let config = Config::from_json(&value);
        assert_eq!(config.settings_files, vec!["settings.py"]);
    }

    #[test]
    fn test_missing_or_malformed_defaults_to_empty() {
        assert!(Config::from_json(&json!({})).settings_files.is_empty());
        assert!(Config::from_json(&json!(null)).settings_files.is_empty());
        assert!(
            Config::from_json(&json!({"djset": {"settingsFiles": "not-a-list"}}))
                .settings_files
                .is_empty()
        );
    }
}
