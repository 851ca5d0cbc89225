//! Typed payloads, one per form, serialized as flat JSON objects.

use super::{FormKind, FormState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSeekerInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(rename = "visaType")]
    pub visa_type: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    pub industry: String,
    pub experience: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub business_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub job_location: String,
    pub employment_type: String,
    pub sponsorship: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// One submission, built from a form on submit and dropped after it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormSubmission {
    JobSeeker(JobSeekerInquiry),
    JobPosting(JobPosting),
    Contact(ContactMessage),
}

impl FormSubmission {
    /// Snapshot a form, trimming every value.
    pub fn from_form(form: &FormState) -> Self {
        let field = |name: &str| form.get(name).trim().to_string();
        match form.kind() {
            FormKind::JobSeeker => Self::JobSeeker(JobSeekerInquiry {
                name: field("name"),
                email: field("email"),
                phone: field("phone"),
                location: field("location"),
                visa_type: field("visaType"),
                job_type: field("jobType"),
                industry: field("industry"),
                experience: field("experience"),
                message: field("message"),
            }),
            FormKind::JobPosting => Self::JobPosting(JobPosting {
                business_name: field("business_name"),
                contact_person: field("contact_person"),
                email: field("email"),
                phone: field("phone"),
                job_title: field("job_title"),
                job_location: field("job_location"),
                employment_type: field("employment_type"),
                sponsorship: field("sponsorship"),
                message: field("message"),
            }),
            FormKind::Contact => Self::Contact(ContactMessage {
                name: field("name"),
                email: field("email"),
                phone: field("phone"),
                subject: field("subject"),
                message: field("message"),
            }),
        }
    }

    pub fn kind(&self) -> FormKind {
        match self {
            Self::JobSeeker(_) => FormKind::JobSeeker,
            Self::JobPosting(_) => FormKind::JobPosting,
            Self::Contact(_) => FormKind::Contact,
        }
    }
}
