//! Delivery of form submissions to the lead-capture endpoint.
//!
//! [`SubmissionClient`] is the seam the pipelines call through; tests plug in
//! scripted clients while the binary uses [`HttpSubmissionClient`].

use crate::error::SubmitError;
use crate::forms::FormSubmission;
use async_trait::async_trait;

mod client;

pub use client::HttpSubmissionClient;

/// Sends one submission and reports success or failure.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError>;
}
