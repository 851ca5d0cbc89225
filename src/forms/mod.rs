//! Lead-capture forms: field sets, in-progress input, and submission.
//!
//! - `submission`: typed payloads sent to the endpoint.
//! - `validate`: email/phone checks and required-field enforcement.
//! - `pipeline`: validate -> submit -> resolve -> reset, one per form.

use crate::modal::ModalId;
use std::collections::BTreeMap;

mod pipeline;
mod submission;
pub mod validate;

pub use pipeline::{ControlState, FormPipeline, SubmitControl, SubmitOutcome};
pub use submission::{ContactMessage, FormSubmission, JobPosting, JobSeekerInquiry};
pub use validate::{FieldHint, ValidationRules};

/// The three forms on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormKind {
    JobSeeker,
    JobPosting,
    Contact,
}

impl FormKind {
    pub fn all() -> &'static [FormKind] {
        &[Self::JobSeeker, Self::JobPosting, Self::Contact]
    }

    /// Stable name used by the CLI and logs.
    pub fn slug(self) -> &'static str {
        match self {
            Self::JobSeeker => "job-seeker",
            Self::JobPosting => "job-posting",
            Self::Contact => "contact",
        }
    }

    /// Element id of the `<form>`.
    pub fn form_id(self) -> &'static str {
        match self {
            Self::JobSeeker => "jobSeekerForm",
            Self::JobPosting => "postJobForm",
            Self::Contact => "contactForm",
        }
    }

    /// Named fields, in the order the endpoint lists them.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::JobSeeker => &[
                "name",
                "email",
                "phone",
                "location",
                "visaType",
                "jobType",
                "industry",
                "experience",
                "message",
            ],
            Self::JobPosting => &[
                "business_name",
                "contact_person",
                "email",
                "phone",
                "job_title",
                "job_location",
                "employment_type",
                "sponsorship",
                "message",
            ],
            Self::Contact => &["name", "email", "phone", "subject", "message"],
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::JobSeeker => &["name", "email", "phone"],
            Self::JobPosting => &[
                "business_name",
                "contact_person",
                "email",
                "phone",
                "job_title",
            ],
            Self::Contact => &["name", "email", "message"],
        }
    }

    /// Submit control label while a request is in flight.
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::JobSeeker => "Submitting...",
            Self::JobPosting => "Posting...",
            Self::Contact => "Sending...",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::JobSeeker => {
                "Thank you for your application! We will review your profile and contact you within 24 hours with suitable opportunities."
            }
            Self::JobPosting => {
                "Your job posting has been submitted successfully! Our team will review it and contact you within 24 hours to discuss the next steps."
            }
            Self::Contact => {
                "Thank you for your message! We will get back to you within 24 hours."
            }
        }
    }

    pub fn failure_alert(self) -> &'static str {
        match self {
            Self::JobSeeker => {
                "There was an error submitting your application. Please try again or contact us directly."
            }
            Self::JobPosting => {
                "There was an error submitting your job posting. Please try again or contact us directly."
            }
            Self::Contact => {
                "There was an error sending your message. Please try again or contact us directly."
            }
        }
    }

    /// Modal hosting the form; closed after a successful submission.
    pub fn origin_modal(self) -> Option<ModalId> {
        match self {
            Self::JobSeeker => Some(ModalId::JobSeeker),
            Self::JobPosting => Some(ModalId::PostJob),
            Self::Contact => None,
        }
    }

    /// Whether the form carries a file attachment indicator.
    pub fn accepts_attachment(self) -> bool {
        self == Self::JobSeeker
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.slug() == slug.trim().to_ascii_lowercase())
    }
}

/// File picked for upload; only its indicator is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size_bytes: u64,
}

impl Attachment {
    /// Indicator text, e.g. `cv.pdf (1.50 MB)`.
    pub fn label(&self) -> String {
        let megabytes = self.size_bytes as f64 / 1024.0 / 1024.0;
        format!("{} ({megabytes:.2} MB)", self.name)
    }
}

/// User input of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    kind: FormKind,
    values: BTreeMap<&'static str, String>,
    attachment: Option<Attachment>,
    hints: BTreeMap<&'static str, FieldHint>,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
            attachment: None,
            hints: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Set one field. Returns false for a field this form does not have.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let Some(name) = self.field_name(field) else {
            return false;
        };
        self.values.insert(name, value.into());
        true
    }

    /// Raw value of a field; empty when unset.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| value.is_empty()) && self.attachment.is_none()
    }

    /// Record the picked file. Ignored for forms without a file input.
    pub fn attach(&mut self, attachment: Attachment) -> bool {
        if !self.kind.accepts_attachment() {
            return false;
        }
        self.attachment = Some(attachment);
        true
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Advisory check run when a field loses focus.
    pub fn blur(&mut self, field: &str) -> FieldHint {
        let Some(name) = self.field_name(field) else {
            return FieldHint::None;
        };
        let hint = validate::hint_for(name, self.get(name));
        self.set_hint(name, hint);
        hint
    }

    pub fn hint(&self, field: &str) -> FieldHint {
        self.hints.get(field).copied().unwrap_or_default()
    }

    pub(crate) fn set_hint(&mut self, field: &'static str, hint: FieldHint) {
        match hint {
            FieldHint::None => {
                self.hints.remove(field);
            }
            FieldHint::Invalid => {
                self.hints.insert(field, hint);
            }
        }
    }

    /// Clear every field, the attachment indicator, and field hints.
    pub fn reset(&mut self) {
        self.values.clear();
        self.attachment = None;
        self.hints.clear();
    }

    fn field_name(&self, field: &str) -> Option<&'static str> {
        self.kind.fields().iter().copied().find(|name| *name == field)
    }
}
