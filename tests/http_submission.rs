//! Form submission against a local HTTP endpoint.

use jobsnvisa::api::HttpSubmissionClient;
use jobsnvisa::config::EndpointConfig;
use jobsnvisa::forms::{Attachment, ControlState, FormKind, SubmitOutcome};
use jobsnvisa::modal::ModalId;
use jobsnvisa::page::BUNDLED_PAGE_HTML;
use jobsnvisa::preferences::{MemoryPreferenceStore, StaticSystemPreference};
use jobsnvisa::site::{Site, SiteOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Consume one request so the reply never races the client's body write.
async fn drain_request(stream: &mut tokio::net::TcpStream) {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await.unwrap_or(0);
        if read == 0 {
            return;
        }
        raw.extend_from_slice(&chunk[..read]);
        let text = String::from_utf8_lossy(&raw);
        let Some(split) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..split]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if raw.len() >= split + 4 + content_length {
            return;
        }
    }
}

/// Answer each connection with the next canned status/body pair.
async fn spawn_endpoint(replies: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for (status_line, body) in replies {
            let (mut stream, _) = listener.accept().await.expect("accept");
            drain_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{addr}")
}

fn site_for(base_url: String) -> Site<MemoryPreferenceStore> {
    let endpoint = EndpointConfig {
        base_url,
        timeout_secs: 3,
        ..EndpointConfig::default()
    };
    let options = SiteOptions {
        submit_timeout: Duration::from_secs(3),
        ..SiteOptions::default()
    };
    Site::start(
        BUNDLED_PAGE_HTML,
        MemoryPreferenceStore::new(),
        &StaticSystemPreference(false),
        Arc::new(HttpSubmissionClient::new(&endpoint)),
        options,
    )
    .expect("bundled page starts")
}

fn fill_job_seeker(site: &mut Site<MemoryPreferenceStore>) {
    let form = site.form_mut(FormKind::JobSeeker);
    form.set("name", "Ravi Kumar");
    form.set("email", "ravi@example.com");
    form.set("phone", "+91 98765 43210");
    form.set("jobType", "full-time");
    form.attach(Attachment {
        name: "cv.pdf".to_string(),
        size_bytes: 1_572_864,
    });
}

#[tokio::test]
async fn failed_then_successful_job_seeker_submission() {
    let base_url = spawn_endpoint(vec![
        ("503 Service Unavailable", r#"{"success":false}"#),
        ("200 OK", r#"{"success":true,"message":"saved"}"#),
    ])
    .await;
    let mut site = site_for(base_url);
    site.open_modal(ModalId::JobSeeker);
    fill_job_seeker(&mut site);

    let first = site.submit(FormKind::JobSeeker).await;
    assert!(matches!(first, SubmitOutcome::Failed(_)), "got: {first:?}");
    assert_eq!(
        site.page_mut().take_alerts(),
        vec![FormKind::JobSeeker.failure_alert().to_string()]
    );
    assert!(site.page().modals.is_open(ModalId::JobSeeker));
    assert_eq!(site.form(FormKind::JobSeeker).get("name"), "Ravi Kumar");
    assert_eq!(site.control(FormKind::JobSeeker).state(), ControlState::Idle);

    let second = site.submit(FormKind::JobSeeker).await;
    assert!(second.is_submitted(), "got: {second:?}");
    assert!(!site.page().modals.is_open(ModalId::JobSeeker));
    assert!(site.page().modals.is_open(ModalId::Success));
    assert!(site.page().modals.scroll_locked());
    assert_eq!(
        site.page().success_message,
        FormKind::JobSeeker.success_message()
    );
    assert!(site.form(FormKind::JobSeeker).attachment().is_none());
    assert_eq!(
        site.control(FormKind::JobSeeker).label(),
        "Submit Application"
    );
}

#[tokio::test]
async fn contact_form_success_leaves_no_form_modal_to_close() {
    let base_url = spawn_endpoint(vec![("200 OK", r#"{"success":true}"#)]).await;
    let mut site = site_for(base_url);
    let form = site.form_mut(FormKind::Contact);
    form.set("name", "Asha");
    form.set("email", "asha@example.com");
    form.set("message", "Do you sponsor carers?");

    let outcome = site.submit(FormKind::Contact).await;
    assert!(outcome.is_submitted(), "got: {outcome:?}");
    assert_eq!(site.page().modals.active(), Some(ModalId::Success));
    assert_eq!(
        site.page().success_message,
        "Thank you for your message! We will get back to you within 24 hours."
    );
    assert_eq!(
        site.page().success_message,
        FormKind::Contact.success_message()
    );
    assert!(site.form(FormKind::Contact).is_empty());
}
