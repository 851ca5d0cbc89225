//! Email/phone format checks and pre-submit validation.

use super::FormState;
use crate::error::ValidationError;
use regex::Regex;
use std::sync::OnceLock;

/// Per-field visual hint (the red border).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldHint {
    #[default]
    None,
    Invalid,
}

/// Which format checks block a submission.
///
/// Required fields always block. A non-blocking format problem still shows
/// its hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub strict_email: bool,
    pub strict_phone: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            strict_email: true,
            strict_phone: false,
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Phone check; whitespace is ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    phone_pattern().is_match(&compact)
}

/// Blur-time hint for one field, checked against the raw value. Only an
/// empty value skips the check; whitespace alone is still malformed.
pub fn hint_for(field: &str, value: &str) -> FieldHint {
    if value.is_empty() {
        return FieldHint::None;
    }
    let valid = match field {
        "email" => is_valid_email(value),
        "phone" => is_valid_phone(value),
        _ => true,
    };
    if valid {
        FieldHint::None
    } else {
        FieldHint::Invalid
    }
}

/// Check a form before it is submitted.
///
/// Every format problem, blocking or not, is recorded as a field hint.
pub fn check(form: &mut FormState, rules: ValidationRules) -> Result<(), ValidationError> {
    let kind = form.kind();
    for &field in kind.required_fields() {
        if form.get(field).trim().is_empty() {
            form.set_hint(field, FieldHint::Invalid);
            return Err(ValidationError::MissingField(field));
        }
    }

    let email = form.get("email").trim().to_string();
    let email_hint = hint_for("email", &email);
    form.set_hint("email", email_hint);

    let phone = form.get("phone").trim().to_string();
    let phone_hint = hint_for("phone", &phone);
    form.set_hint("phone", phone_hint);

    if rules.strict_email && email_hint == FieldHint::Invalid {
        return Err(ValidationError::InvalidEmail(email));
    }
    if rules.strict_phone && phone_hint == FieldHint::Invalid {
        return Err(ValidationError::InvalidPhone(phone));
    }
    if email_hint == FieldHint::Invalid || phone_hint == FieldHint::Invalid {
        tracing::debug!(form = kind.slug(), "advisory format hint on submit");
    }
    Ok(())
}

/// Alert text shown when validation blocks a submission.
pub fn user_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingField(field) => {
            format!("Please fill in the required field: {}.", field_label(field))
        }
        ValidationError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
        ValidationError::InvalidPhone(_) => "Please enter a valid phone number.".to_string(),
    }
}

fn field_label(field: &str) -> String {
    match field {
        "visaType" => "visa type".to_string(),
        "jobType" => "job type".to_string(),
        other => other.replace('_', " "),
    }
}
