// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tweetscope_app::MenuDefinition;
use tweetscope_data::{APP_NAME, ArtifactKind, DATASET_FILE, DEFAULT_PREVIEW_ROWS, DataFiles};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
pub const CONFIG_PATH_ENV: &str = "TWEETSCOPE_CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "TWEETSCOPE_DATA_DIR";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: Option<i64>,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Some(CONFIG_VERSION),
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub dir: Option<String>,
    pub dataset: Option<String>,
    pub cleaned: Option<String>,
    pub stemmed: Option<String>,
    pub tokenized: Option<String>,
    pub preview_rows: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub default_view: Option<String>,
    pub show_icons: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            default_view: None,
            show_icons: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        match config.version {
            Some(CONFIG_VERSION) => {}
            Some(version) => bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            ),
            None => bail!(
                "config file {} is not versioned. Add `version = 1` and put values under [data], [ui], and [log]",
                path.display()
            ),
        }

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(dir) = &self.data.dir {
            validate_data_dir(dir)
                .with_context(|| format!("data.dir in {}", path.display()))?;
        }

        for (key, value) in [
            ("dataset", &self.data.dataset),
            ("cleaned", &self.data.cleaned),
            ("stemmed", &self.data.stemmed),
            ("tokenized", &self.data.tokenized),
        ] {
            if let Some(name) = value
                && name.trim().is_empty()
            {
                bail!("data.{key} in {} must not be empty", path.display());
            }
        }

        if let Some(rows) = self.data.preview_rows
            && rows <= 0
        {
            bail!(
                "data.preview_rows in {} must be positive, got {}",
                path.display(),
                rows
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {level:?}",
                path.display(),
                LOG_LEVELS.join(", ")
            );
        }

        if let Some(view) = &self.ui.default_view {
            let menu = MenuDefinition::dashboard()?;
            if menu.entry(view).is_none() {
                let known = menu
                    .keys()
                    .map(|key| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                bail!(
                    "ui.default_view {view:?} in {} is not a menu entry; use one of: {known}",
                    path.display()
                );
            }
        }

        Ok(())
    }

    /// `TWEETSCOPE_DATA_DIR` wins over `[data].dir`; the working directory is
    /// the fallback.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = env::var_os(DATA_DIR_ENV) {
            let dir = PathBuf::from(dir);
            validate_data_dir(&dir.to_string_lossy())
                .with_context(|| format!("{DATA_DIR_ENV} is invalid"))?;
            return Ok(dir);
        }
        Ok(self
            .data
            .dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn data_files(&self) -> DataFiles {
        let defaults = DataFiles::default();
        DataFiles {
            dataset: self.data.dataset.clone().unwrap_or(defaults.dataset),
            cleaned: self.data.cleaned.clone().unwrap_or(defaults.cleaned),
            stemmed: self.data.stemmed.clone().unwrap_or(defaults.stemmed),
            tokenized: self.data.tokenized.clone().unwrap_or(defaults.tokenized),
        }
    }

    pub fn preview_rows(&self) -> usize {
        self.data
            .preview_rows
            .and_then(|rows| usize::try_from(rows).ok())
            .unwrap_or(DEFAULT_PREVIEW_ROWS)
    }

    pub fn default_view(&self) -> Option<&str> {
        self.ui.default_view.as_deref()
    }

    pub fn show_icons(&self) -> bool {
        self.ui.show_icons.unwrap_or(true)
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file in the config")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# {APP_NAME} config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Directory holding the labeled dataset and preprocessing outputs.\n# Defaults to the working directory; {DATA_DIR_ENV} overrides it.\n# dir = \"/absolute/path/to/data\"\ndataset = \"{DATASET_FILE}\"\ncleaned = \"{}\"\nstemmed = \"{}\"\ntokenized = \"{}\"\npreview_rows = {DEFAULT_PREVIEW_ROWS}\n\n[ui]\n# default_view = \"home\"\nshow_icons = true\n\n[log]\n# RUST_LOG overrides this level.\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# file = \"/absolute/path/to/{APP_NAME}.log\"\n",
            path.display(),
            ArtifactKind::Cleaned.default_file_name(),
            ArtifactKind::Stemmed.default_file_name(),
            ArtifactKind::Tokenized.default_file_name(),
        )
    }
}

pub fn validate_data_dir(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        bail!("data directory must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "data directory {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("data directory {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config, DATA_DIR_ENV, validate_data_dir};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

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
        assert_eq!(config.version, Some(1));
        assert_eq!(config.preview_rows(), 10);
        assert!(config.show_icons());
        assert_eq!(config.default_view(), None);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.data_files().stemmed, "stemmed_tweets.csv");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[data]\ndir = \"/data\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[data], [ui], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
        let (_temp, path) = write_config(
            "version = 1\n[data]\ndir = \"/srv/tweets\"\ncleaned = \"clean.csv\"\npreview_rows = 25\n[ui]\ndefault_view = \"distribution\"\nshow_icons = false\n[log]\nlevel = \"DEBUG\"\nfile = \"/tmp/tweetscope.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.data_dir()?, PathBuf::from("/srv/tweets"));
        assert_eq!(config.data_files().cleaned, "clean.csv");
        assert_eq!(config.data_files().dataset, "labeled_data.csv");
        assert_eq!(config.preview_rows(), 25);
        assert_eq!(config.default_view(), Some("distribution"));
        assert!(!config.show_icons());
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_file()?, PathBuf::from("/tmp/tweetscope.log"));
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
    fn loaded_config_carries_its_version() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nshow_icons = false\n")?;
        let config = Config::load(&path)?;
        assert_eq!(config.version, Some(1));
        assert!(!config.show_icons());

        let (_temp, path) = write_config("version = \"1\"\n")?;
        let error = Config::load(&path).expect_err("string version should fail");
        assert!(format!("{error:#}").contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn non_positive_preview_rows_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[data]\npreview_rows = 0\n")?;
        let error = Config::load(&path).expect_err("zero preview rows should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn unknown_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("unknown level should fail");
        assert!(error.to_string().contains("log.level"));
        Ok(())
    }

    #[test]
    fn default_view_must_be_a_menu_entry() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ndefault_view = \"charts\"\n")?;
        let error = Config::load(&path).expect_err("unknown view should fail");
        let message = error.to_string();
        assert!(message.contains("\"charts\""), "unexpected message: {message}");
        assert!(message.contains("distribution"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn empty_file_name_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[data]\nstemmed = \" \"\n")?;
        let error = Config::load(&path).expect_err("empty file name should fail");
        assert!(error.to_string().contains("data.stemmed"));
        Ok(())
    }

    #[test]
    fn uri_data_dir_is_rejected() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[data]\ndir = \"https://example.com/tweets\"\n")?;
        let error = Config::load(&path).expect_err("URI data dir should fail");
        assert!(format!("{error:#}").contains("looks like a URI"));

        assert!(validate_data_dir("file:data").is_err());
        assert!(validate_data_dir("").is_err());
        assert!(validate_data_dir("/srv/tweets").is_ok());
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved?, override_path);
        Ok(())
    }

    #[test]
    fn data_dir_env_overrides_config() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[data]\ndir = \"/from/config\"\n")?;
        let config = Config::load(&path)?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/from/env");
        }
        let resolved = config.data_dir();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
        assert_eq!(resolved?, PathBuf::from("/from/env"));
        Ok(())
    }

    #[test]
    fn data_dir_defaults_to_working_directory() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
        assert_eq!(Config::default().data_dir()?, PathBuf::from("."));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[data]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.preview_rows(), 10);
        assert_eq!(config.data_files().tokenized, "tokenized_tweets.csv");
        Ok(())
    }
}
