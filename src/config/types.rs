//! Configuration data model.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{
    DEFAULT_CONTACT_PATH, DEFAULT_ENDPOINT_BASE_URL, DEFAULT_JOB_POSTING_PATH,
    DEFAULT_JOB_SEEKER_PATH, DEFAULT_SUBMIT_TIMEOUT_SECS,
};
use crate::forms::{FormKind, ValidationRules};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub display: DisplayConfig,
    pub validation: ValidationConfig,
    pub storage: StorageConfig,
}

/// Where and how submissions are delivered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub job_seeker_path: String,
    pub job_posting_path: String,
    pub contact_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
            job_seeker_path: DEFAULT_JOB_SEEKER_PATH.to_string(),
            job_posting_path: DEFAULT_JOB_POSTING_PATH.to_string(),
            contact_path: DEFAULT_CONTACT_PATH.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Absolute URL for one form's endpoint.
    pub fn url_for(&self, kind: FormKind) -> String {
        let path = match kind {
            FormKind::JobSeeker => &self.job_seeker_path,
            FormKind::JobPosting => &self.job_posting_path,
            FormKind::Contact => &self.contact_path,
        };
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Source of the host "prefers dark" signal.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SystemTheme {
    /// Detect from the terminal environment.
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub system_theme: SystemTheme,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            system_theme: SystemTheme::Auto,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub strict_email: bool,
    pub strict_phone: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            strict_email: rules.strict_email,
            strict_phone: rules.strict_phone,
        }
    }
}

impl ValidationConfig {
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            strict_email: self.strict_email,
            strict_phone: self.strict_phone,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Preference file override; defaults to the platform config dir.
    pub preferences_path: Option<String>,
}
