//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`JOBSNVISA_ENDPOINT`, `JOBSNVISA_TIMEOUT_SECS`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./jobsnvisa.toml in the current directory
//! 4. $XDG_CONFIG_HOME/jobsnvisa/jobsnvisa.toml (or
//!    ~/.config/jobsnvisa/jobsnvisa.toml)
//! 5. Built-in defaults

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

mod defaults;
mod types;

pub use types::{
    Config, DisplayConfig, EndpointConfig, StorageConfig, SystemTheme, ValidationConfig,
};

/// Where the effective config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local,
    Global(PathBuf),
    BuiltInDefaults,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )?
    .0)
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<(Config, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&text)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    validate_config(&config)?;
    tracing::debug!(source = ?source, base_url = %config.endpoint.base_url, "config loaded");
    Ok((config, source))
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Ok(text) = read_file(Path::new("jobsnvisa.toml")) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join("jobsnvisa").join("jobsnvisa.toml");
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = env_lookup("JOBSNVISA_ENDPOINT").and_then(|v| normalized_string(&v)) {
        config.endpoint.base_url = url;
    }
    if let Some(timeout) = env_lookup("JOBSNVISA_TIMEOUT_SECS") {
        let parsed = timeout.trim().parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid JOBSNVISA_TIMEOUT_SECS value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.endpoint.timeout_secs = parsed;
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.endpoint.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "endpoint.base_url must be an http(s) URL, got `{base_url}`"
        )));
    }
    if config.endpoint.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "endpoint.timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Commented config template, printed by `jobsnvisa config`.
pub fn config_template() -> &'static str {
    defaults::DEFAULT_CONFIG_TEMPLATE
}

pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
