//! Shared test fixtures for preference, pipeline and site tests.

use crate::api::SubmissionClient;
use crate::error::SubmitError;
use crate::forms::FormSubmission;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("jobsnvisa-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One canned endpoint behavior.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Accept,
    Status(u16),
    Reject,
    /// Never answer; only a timeout ends the call.
    Hang,
}

/// Submission client that replays scripted replies and records every call.
///
/// Once the script runs out, every further call is accepted.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<FormSubmission>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<FormSubmission> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl SubmissionClient for ScriptedClient {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(submission.clone());
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or(Reply::Accept);
        match reply {
            Reply::Accept => Ok(()),
            Reply::Status(code) => Err(SubmitError::Status(code, String::new())),
            Reply::Reject => Err(SubmitError::Rejected),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormKind, FormState};

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.path().exists());
    }

    #[tokio::test]
    async fn scripted_client_replays_then_accepts() {
        let client = ScriptedClient::new([Reply::Reject]);
        let submission = FormSubmission::from_form(&FormState::new(FormKind::Contact));
        assert!(matches!(
            client.submit(&submission).await,
            Err(SubmitError::Rejected)
        ));
        assert!(client.submit(&submission).await.is_ok());
        assert_eq!(client.calls().len(), 2);
    }
}
