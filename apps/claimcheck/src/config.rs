use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::ValueEnum;
use client_core::DEFAULT_BACKEND_URL;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "claimcheck.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub log_filter: String,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            log_filter: "warn".into(),
            format: OutputFormat::Text,
        }
    }
}

impl Settings {
    pub fn with_overrides(
        mut self,
        backend_url: Option<String>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(v) = backend_url {
            self.backend_url = v;
        }
        if let Some(v) = format {
            self.format = v;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    log_filter: Option<String>,
    format: Option<OutputFormat>,
}

/// Defaults, then the config file, then environment.
///
/// Without an explicit path a missing `claimcheck.toml` is fine; an explicit
/// path that cannot be read is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with_env(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with_env(
    config_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, lookup);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.format {
        settings.format = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CLAIMCHECK_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = lookup("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = lookup("CLAIMCHECK_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__FORMAT") {
        if let Ok(parsed) = OutputFormat::from_str(&v, true) {
            settings.format = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
