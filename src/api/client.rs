//! reqwest-backed submission client.

use super::SubmissionClient;
use crate::config::EndpointConfig;
use crate::error::SubmitError;
use crate::forms::{FormKind, FormSubmission};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Posts each submission as JSON to its form's endpoint.
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    endpoint: EndpointConfig,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct EndpointReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

impl HttpSubmissionClient {
    pub fn new(endpoint: &EndpointConfig) -> Self {
        let timeout = endpoint.timeout();
        Self {
            http: build_http_client(timeout),
            endpoint: endpoint.clone(),
            timeout,
        }
    }

    pub fn url_for(&self, kind: FormKind) -> String {
        self.endpoint.url_for(kind)
    }

    async fn post(&self, submission: &FormSubmission) -> Result<(), SubmitError> {
        let url = self.url_for(submission.kind());
        let response = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| self.classify(err))?;
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16(), body));
        }

        let reply: EndpointReply = serde_json::from_str(&body)
            .map_err(|err| SubmitError::InvalidResponse(format!("{err}: {body}")))?;
        if reply.success {
            Ok(())
        } else {
            if let Some(message) = reply.message.as_deref() {
                tracing::debug!(form = submission.kind().slug(), message, "endpoint declined");
            }
            Err(SubmitError::Rejected)
        }
    }

    fn classify(&self, err: reqwest::Error) -> SubmitError {
        if err.is_timeout() {
            SubmitError::Timeout(self.timeout)
        } else {
            SubmitError::Http(err)
        }
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError> {
        tracing::debug!(
            form = submission.kind().slug(),
            url = %self.url_for(submission.kind()),
            "posting submission"
        );
        self.post(submission).await
    }
}
