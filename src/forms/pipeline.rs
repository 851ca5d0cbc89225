//! One submission pipeline per form: validate, go busy, send once, resolve.
//!
//! The submit control is held busy by a [`BusyGuard`] for the lifetime of the
//! request. Dropping the guard restores the idle label and re-enables the
//! control, so every exit path (success, failure, timeout, a dropped future or
//! a panic in a client) leaves the control idle again. `submit` borrows the
//! pipeline mutably for the whole request, so a second submit of the same
//! form cannot start until the first has resolved.

use super::validate::{self, ValidationRules};
use super::{FormKind, FormState, FormSubmission};
use crate::api::SubmissionClient;
use crate::error::{SubmitError, ValidationError};
use crate::page::Page;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Busy,
}

/// The form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    idle_label: String,
    label: String,
    disabled: bool,
}

impl SubmitControl {
    pub fn new(idle_label: impl Into<String>) -> Self {
        let idle_label = idle_label.into();
        Self {
            label: idle_label.clone(),
            idle_label,
            disabled: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn state(&self) -> ControlState {
        if self.disabled {
            ControlState::Busy
        } else {
            ControlState::Idle
        }
    }
}

/// Keeps a control busy until dropped.
struct BusyGuard<'a> {
    control: &'a mut SubmitControl,
}

impl<'a> BusyGuard<'a> {
    fn engage(control: &'a mut SubmitControl, busy_label: &str) -> Self {
        control.label = busy_label.to_string();
        control.disabled = true;
        Self { control }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.label = self.control.idle_label.clone();
        self.control.disabled = false;
    }
}

/// How one submit attempt resolved.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Endpoint accepted; success modal shown and the form reset.
    Submitted,
    /// Request failed; alert raised and input kept for a retry.
    Failed(SubmitError),
    /// Blocked before any request was issued.
    Invalid(ValidationError),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Submission state machine of one form.
#[derive(Debug)]
pub struct FormPipeline {
    kind: FormKind,
    form: FormState,
    control: SubmitControl,
    rules: ValidationRules,
    timeout: Duration,
}

impl FormPipeline {
    pub fn new(
        kind: FormKind,
        idle_label: impl Into<String>,
        rules: ValidationRules,
        timeout: Duration,
    ) -> Self {
        Self {
            kind,
            form: FormState::new(kind),
            control: SubmitControl::new(idle_label),
            rules,
            timeout,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// Run one submission to completion.
    ///
    /// Exactly one request is issued when validation passes. The control is
    /// idle again by the time this returns.
    pub async fn submit(&mut self, page: &mut Page, client: &dyn SubmissionClient) -> SubmitOutcome {
        if let Err(err) = validate::check(&mut self.form, self.rules) {
            tracing::info!(form = self.kind.slug(), field = err.field(), "submission blocked: {err}");
            page.alert(&validate::user_message(&err));
            return SubmitOutcome::Invalid(err);
        }

        let submission = FormSubmission::from_form(&self.form);
        let result = {
            let _busy = BusyGuard::engage(&mut self.control, self.kind.busy_label());
            tracing::info!(form = self.kind.slug(), "submitting");
            match tokio::time::timeout(self.timeout, client.submit(&submission)).await {
                Ok(result) => result,
                Err(_) => Err(SubmitError::Timeout(self.timeout)),
            }
        };

        match result {
            Ok(()) => {
                tracing::info!(form = self.kind.slug(), "submission accepted");
                if let Some(origin) = self.kind.origin_modal() {
                    page.modals.close(origin);
                }
                page.show_success(self.kind.success_message());
                self.form.reset();
                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::error!(form = self.kind.slug(), error = %err, "submission failed");
                page.alert(self.kind.failure_alert());
                SubmitOutcome::Failed(err)
            }
        }
    }
}
