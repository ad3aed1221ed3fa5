use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Records file used when `--records` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SinaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            records_path: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("sina").join("config.json"))
}

/// Load the config at `path`; a missing file yields defaults.
///
/// Also returns the on-disk version when a migration was applied, so the
/// caller can log it once the subscriber is installed.
pub fn load_config(path: &Path) -> eyre::Result<(SinaConfig, Option<u32>)> {
    if !path.exists() {
        return Ok((SinaConfig::default(), None));
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SinaConfig = serde_json::from_value(migrated)?;
    let migrated_from = (on_disk_version < CURRENT_VERSION).then_some(on_disk_version);
    Ok((config, migrated_from))
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update sina."
        ));
    }

    // v0 → v1: stamp the version; every v1 field has a serde default
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert("config_version".to_string(), 1.into());
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(path: &Path, config: &SinaConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent directory", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_config_is_stamped() {
        let json = serde_json::json!({
            "records_path": "/data/records.json",
            "log_level": "debug",
            "log_format": "json",
        });
        let migrated = migrate(json, 0).unwrap();
        let config: SinaConfig = serde_json::from_value(migrated).unwrap();

        assert_eq!(config.config_version, 1);
        assert_eq!(config.records_path, Some(PathBuf::from("/data/records.json")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn empty_unversioned_config_gets_defaults() {
        let config: SinaConfig =
            serde_json::from_value(migrate(serde_json::json!({}), 0).unwrap()).unwrap();
        assert_eq!(config, SinaConfig::default());
    }

    #[test]
    fn newer_config_is_refused() {
        let json = serde_json::json!({ "config_version": 99 });
        assert!(migrate(json, 99).is_err());
    }

    #[test]
    fn non_object_is_refused() {
        assert!(migrate(serde_json::json!([1, 2]), 0).is_err());
    }

    #[test]
    fn load_reports_migrated_version() {
        let dir = std::env::temp_dir().join(format!("sina-config-v0-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{ "log_level": "warn" }"#).unwrap();

        let (config, migrated_from) = load_config(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(migrated_from, Some(0));
        assert_eq!(config.config_version, CURRENT_VERSION);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("sina-config-{}", std::process::id()));
        let path = dir.join("config.json");
        let config = SinaConfig {
            config_version: 0,
            records_path: Some(PathBuf::from("records.json")),
            log_level: "warn".into(),
            log_format: LogFormat::Json,
        };
        save_config(&path, &config).unwrap();
        let (loaded, migrated_from) = load_config(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(migrated_from, None);
        assert_eq!(loaded.config_version, CURRENT_VERSION);
        assert_eq!(loaded.records_path, config.records_path);
        assert_eq!(loaded.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("sina-config-does-not-exist/config.json");
        assert_eq!(load_config(&path).unwrap(), (SinaConfig::default(), None));
    }
}
