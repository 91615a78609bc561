// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use neutron_csv::LineEnding;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_STATUS_CLEAR_SECS: i64 = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub files: Files,
    #[serde(default)]
    pub csv: Csv,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            files: Files::default(),
            csv: Csv::default(),
            ui: Ui::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Files {
    pub default_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Csv {
    pub line_ending: Option<LineEnding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub confirm_load: Option<bool>,
    pub status_clear_secs: Option<i64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            confirm_load: Some(true),
            status_clear_secs: Some(DEFAULT_STATUS_CLEAR_SECS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("NEUTRON_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set NEUTRON_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(neutron_csv::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [files], [csv], [ui], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(dir) = &self.files.default_dir
            && dir.trim().is_empty()
        {
            bail!(
                "files.default_dir in {} must not be empty; remove it to save next to the working directory",
                path.display()
            );
        }

        if let Some(secs) = self.ui.status_clear_secs
            && secs <= 0
        {
            bail!(
                "ui.status_clear_secs in {} must be positive, got {}",
                path.display(),
                secs
            );
        }

        if let Some(level) = &self.logging.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "logging.level in {} is not a valid filter: {level:?}; try \"info\" or \"neutron_csv=debug\"",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn default_dir(&self) -> Option<PathBuf> {
        self.files.default_dir.as_ref().map(PathBuf::from)
    }

    pub fn line_ending(&self) -> LineEnding {
        self.csv.line_ending.unwrap_or_default()
    }

    pub fn confirm_load(&self) -> bool {
        self.ui.confirm_load.unwrap_or(true)
    }

    pub fn status_clear_after(&self) -> Duration {
        let secs = self
            .ui
            .status_clear_secs
            .unwrap_or(DEFAULT_STATUS_CLEAR_SECS);
        Duration::from_secs(secs.max(1).unsigned_abs())
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.logging.dir {
            return Ok(PathBuf::from(dir));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [logging].dir in the config file")
        })?;
        Ok(data_root.join(neutron_csv::APP_NAME).join("logs"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# neutron config\n# Place this file at: {}\n\nversion = 1\n\n[files]\n# Optional. Directory used for suggested save paths; default is the working directory\n# default_dir = \"/absolute/path/to/routes\"\n\n[csv]\n# \"lf\" or \"crlf\"\nline_ending = \"lf\"\n\n[ui]\nconfirm_load = true\nstatus_clear_secs = {}\n\n[logging]\n# Any RUST_LOG style filter; RUST_LOG wins when set\nlevel = \"{}\"\n# dir = \"/absolute/path/to/logs\"\n",
            path.display(),
            DEFAULT_STATUS_CLEAR_SECS,
            DEFAULT_LOG_LEVEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use neutron_csv::LineEnding;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert!(config.confirm_load());
        assert_eq!(config.line_ending(), LineEnding::Lf);
        assert_eq!(config.status_clear_after(), Duration::from_secs(4));
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.default_dir(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nconfirm_load = false\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[files], [csv], [ui], and [logging]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[files]\ndefault_dir = \"/routes\"\n[csv]\nline_ending = \"crlf\"\n[ui]\nconfirm_load = false\nstatus_clear_secs = 9\n[logging]\nlevel = \"neutron_csv=debug\"\ndir = \"/var/log/neutron\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.default_dir(), Some(PathBuf::from("/routes")));
        assert_eq!(config.line_ending(), LineEnding::Crlf);
        assert!(!config.confirm_load());
        assert_eq!(config.status_clear_after(), Duration::from_secs(9));
        assert_eq!(config.log_level(), "neutron_csv=debug");
        assert_eq!(config.log_dir()?, PathBuf::from("/var/log/neutron"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_line_ending_fails_to_decode() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[csv]\nline_ending = \"cr\"\n")?;
        let error = Config::load(&path).expect_err("unknown line ending should fail");
        assert!(error.to_string().contains("decode config"));
        Ok(())
    }

    #[test]
    fn non_positive_status_clear_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstatus_clear_secs = 0\n")?;
        let error = Config::load(&path).expect_err("zero seconds should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn empty_default_dir_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[files]\ndefault_dir = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank dir should fail");
        assert!(error.to_string().contains("files.default_dir"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[logging]\nlevel = \"neutron=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad filter should fail");
        assert!(error.to_string().contains("logging.level"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("NEUTRON_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("NEUTRON_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("NEUTRON_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("neutron/config.toml"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        for section in ["[files]", "[csv]", "[ui]", "[logging]"] {
            assert!(example.contains(section), "missing {section}");
        }

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.line_ending(), LineEnding::Lf);
        assert!(config.confirm_load());
        Ok(())
    }
}
