//! Default configuration constants.

/// Commented `jobsnvisa.toml` describing every setting.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/jobsnvisa.toml");
/// Base URL for the lead-capture endpoints.
pub(super) const DEFAULT_ENDPOINT_BASE_URL: &str = "http://localhost:8080/api";
/// Upper bound on one submission round trip.
pub(super) const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 15;
pub(super) const DEFAULT_JOB_SEEKER_PATH: &str = "job-seeker.php";
pub(super) const DEFAULT_JOB_POSTING_PATH: &str = "post_jobs.php";
pub(super) const DEFAULT_CONTACT_PATH: &str = "contact.php";
