//! Error types for the site core.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// PreferenceError
// ---------------------------------------------------------------------------

/// Errors reading or writing the persisted preference slot.
#[derive(Debug)]
pub enum PreferenceError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Serialize(e) => write!(f, "serialize: {e}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl From<std::io::Error> for PreferenceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for PreferenceError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<toml::ser::Error> for PreferenceError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

// ---------------------------------------------------------------------------
// StartupError
// ---------------------------------------------------------------------------

/// Page precondition failures detected before any handler is wired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// A required interactive element is absent; holds its CSS selector.
    MissingElement(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(id) => {
                write!(f, "required page element `{id}` is missing")
            }
        }
    }
}

impl std::error::Error for StartupError {}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// Blocking input problems found before a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidEmail(String),
    InvalidPhone(String),
}

impl ValidationError {
    /// Form field the problem is attached to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(name) => name,
            Self::InvalidEmail(_) => "email",
            Self::InvalidPhone(_) => "phone",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing required field `{name}`"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::InvalidPhone(value) => write!(f, "invalid phone number `{value}`"),
        }
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// SubmitError
// ---------------------------------------------------------------------------

/// Transport or endpoint failures for one submission.
///
/// Callers treat every variant the same way; the distinction only feeds
/// diagnostics.
#[derive(Debug)]
pub enum SubmitError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the endpoint.
    Status(u16, String),
    /// 2xx response whose body could not be interpreted.
    InvalidResponse(String),
    /// Endpoint answered `{"success": false}`.
    Rejected,
    /// No answer within the configured submission timeout.
    Timeout(std::time::Duration),
}

impl SubmitError {
    /// HTTP status code when the endpoint answered with a non-2xx status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code, _) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code, body) => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::Rejected => write!(f, "endpoint rejected the submission"),
            Self::Timeout(after) => write!(f, "no response after {}ms", after.as_millis()),
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn startup_error_names_the_element() {
        let e = StartupError::MissingElement("#themeToggle".to_string());
        assert_eq!(e.to_string(), "required page element `#themeToggle` is missing");
    }

    #[test]
    fn validation_error_reports_field() {
        assert_eq!(ValidationError::MissingField("name").field(), "name");
        assert_eq!(ValidationError::InvalidEmail("x".into()).field(), "email");
        assert_eq!(ValidationError::InvalidPhone("x".into()).field(), "phone");
    }

    #[test]
    fn submit_error_display_variants() {
        assert_eq!(
            SubmitError::Status(500, "boom".into()).to_string(),
            "status 500: boom"
        );
        assert_eq!(SubmitError::Status(503, String::new()).status_code(), Some(503));
        assert_eq!(SubmitError::Rejected.status_code(), None);
        assert_eq!(
            SubmitError::Timeout(Duration::from_millis(40)).to_string(),
            "no response after 40ms"
        );
    }
}
