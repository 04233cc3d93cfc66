use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use earlysign_instruments::instruments::toddler_social;

/// Current config version. Bump this when changing the shape in a way old
/// files cannot deserialize into, and convert older files in
/// [`load_config_from`] before deserializing.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlysignConfig {
    #[serde(default = "current_version")]
    pub config_version: u32,
    /// Where results are stored. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Questionnaire used by `assess`.
    #[serde(default = "default_questionnaire")]
    pub questionnaire: String,
    #[serde(default)]
    pub log_format: LogFormat,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the effective config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Defaults,
    File,
}

/// A config together with its location, so callers can report it once
/// logging is up.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: EarlysignConfig,
    pub path: PathBuf,
    pub source: ConfigSource,
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

fn default_questionnaire() -> String {
    toddler_social::ID.to_string()
}

impl EarlysignConfig {
    pub fn new() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: None,
            questionnaire: default_questionnaire(),
            log_format: LogFormat::default(),
            created_at: jiff::Timestamp::now(),
        }
    }

    /// The configured data directory, or the platform default.
    pub fn resolve_data_dir(&self) -> eyre::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

impl Default for EarlysignConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("earlysign"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("earlysign"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

/// Load the config file, or defaults when none has been written yet.
pub fn load_or_default() -> eyre::Result<LoadedConfig> {
    load_or_default_from(config_path()?)
}

pub fn load_or_default_from(path: PathBuf) -> eyre::Result<LoadedConfig> {
    if path.exists() {
        Ok(LoadedConfig {
            config: load_config_from(&path)?,
            path,
            source: ConfigSource::File,
        })
    } else {
        Ok(LoadedConfig {
            config: EarlysignConfig::new(),
            path,
            source: ConfigSource::Defaults,
        })
    }
}

pub fn load_config_from(path: &Path) -> eyre::Result<EarlysignConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so the version is checked before the shape is.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    check_version(&json)?;
    let config: EarlysignConfig = serde_json::from_value(json)?;
    Ok(config)
}

/// Reject files written by a newer build. A missing version reads as current.
pub fn check_version(json: &serde_json::Value) -> eyre::Result<u32> {
    let on_disk = match json.get("config_version") {
        None => CURRENT_VERSION,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| eyre::eyre!("config_version {v} is not a valid version number"))?,
    };

    if on_disk > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {on_disk} is newer than this build supports ({CURRENT_VERSION}). \
             Please update earlysign."
        ));
    }
    Ok(on_disk)
}

pub fn save_config(config: &EarlysignConfig) -> eyre::Result<PathBuf> {
    let path = config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &EarlysignConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    if let Err(e) = write_then_rename(&tmp_path, path, json.as_bytes()) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(eyre::eyre!("failed to write config at {}: {e}", path.display()));
    }

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

fn write_then_rename(tmp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(tmp_path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(tmp_path, path)
}
