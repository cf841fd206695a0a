use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{BudgetError, Result},
    utils::paths::{ensure_dir, PathResolver},
};

const TMP_SUFFIX: &str = "tmp";
const MAX_CHART_WIDTH: usize = 200;

/// User-configurable shell preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_chart_width")]
    pub chart_width: usize,
    #[serde(default)]
    pub quiet_mode: bool,
    #[serde(default)]
    pub high_contrast_mode: bool,
    #[serde(default)]
    pub screen_reader_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart_width: Self::default_chart_width(),
            quiet_mode: false,
            high_contrast_mode: false,
            screen_reader_mode: false,
        }
    }
}

impl Config {
    pub fn default_chart_width() -> usize {
        40
    }

    /// Updates a single preference from its textual key and value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_ascii_lowercase().as_str() {
            "chart_width" => {
                let width: usize = value.trim().parse().map_err(|_| {
                    BudgetError::ConfigError("chart_width must be a positive integer".into())
                })?;
                if width == 0 || width > MAX_CHART_WIDTH {
                    return Err(BudgetError::ConfigError(format!(
                        "chart_width must be between 1 and {MAX_CHART_WIDTH}"
                    )));
                }
                self.chart_width = width;
            }
            "quiet_mode" => self.quiet_mode = parse_flag(key, value)?,
            "high_contrast_mode" => self.high_contrast_mode = parse_flag(key, value)?,
            "screen_reader_mode" => self.screen_reader_mode = parse_flag(key, value)?,
            other => {
                return Err(BudgetError::ConfigError(format!(
                    "unknown configuration key `{other}`"
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("chart_width", self.chart_width.to_string()),
            ("quiet_mode", on_off(self.quiet_mode).into()),
            ("high_contrast_mode", on_off(self.high_contrast_mode).into()),
            ("screen_reader_mode", on_off(self.screen_reader_mode).into()),
        ]
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(BudgetError::ConfigError(format!(
            "{key} expects on/off, got `{value}`"
        ))),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Loads and saves [`Config`] as JSON under the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            tracing::debug!(path = %self.path.display(), "configuration loaded");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, ConfigManager) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        (temp, manager)
    }

    #[test]
    fn missing_file_loads_defaults() {
        let (_temp, manager) = manager();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn saved_config_is_reloaded() {
        let (_temp, manager) = manager();
        let mut config = Config::default();
        config.set("chart_width", "24").unwrap();
        config.set("quiet_mode", "on").unwrap();
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn partial_files_fall_back_to_field_defaults() {
        let (_temp, manager) = manager();
        fs::write(manager.path(), r#"{ "quiet_mode": true }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.quiet_mode);
        assert_eq!(config.chart_width, 40);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("chart_width", "0").is_err());
        assert!(config.set("chart_width", "wide").is_err());
        assert!(config.set("quiet_mode", "maybe").is_err());
        assert!(config.set("currency", "USD").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn entries_list_every_key() {
        let keys: Vec<_> = Config::default()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(
            keys,
            ["chart_width", "quiet_mode", "high_contrast_mode", "screen_reader_mode"]
        );
    }
}
