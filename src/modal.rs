//! Modal dialogs and the page scroll lock they hold.

use std::collections::BTreeSet;

/// Known modals, ordered as they appear in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModalId {
    JobSeeker,
    PostJob,
    Success,
}

impl ModalId {
    pub fn all() -> &'static [ModalId] {
        &[Self::JobSeeker, Self::PostJob, Self::Success]
    }

    /// Root element id of the modal.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::JobSeeker => "jobSeekerModal",
            Self::PostJob => "postJobModal",
            Self::Success => "successModal",
        }
    }

    /// Id of the explicit close control inside the modal.
    pub fn close_control_id(self) -> &'static str {
        match self {
            Self::JobSeeker => "closeJobSeekerModal",
            Self::PostJob => "closePostJobModal",
            Self::Success => "closeSuccessModal",
        }
    }

    /// Id of the page button that opens the modal, if any.
    pub fn trigger_id(self) -> Option<&'static str> {
        match self {
            Self::JobSeeker => Some("jobSeekerBtn"),
            Self::PostJob => Some("postJobBtn"),
            Self::Success => None,
        }
    }
}

/// Page body overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// Where a click inside a modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The modal root itself, i.e. the backdrop.
    Root,
    /// Any descendant, such as the dialog content.
    Content,
}

/// Visibility of each modal plus the scroll lock.
///
/// Scroll is locked while at least one modal is open; closing the last one
/// restores whatever overflow the page had before the first one opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalManager {
    open: BTreeSet<ModalId>,
    overflow: Overflow,
    saved_overflow: Option<Overflow>,
}

impl ModalManager {
    pub fn new(overflow: Overflow) -> Self {
        Self {
            open: BTreeSet::new(),
            overflow,
            saved_overflow: None,
        }
    }

    pub fn open(&mut self, modal: ModalId) {
        if self.open.is_empty() {
            self.saved_overflow = Some(self.overflow);
        }
        self.open.insert(modal);
        self.overflow = Overflow::Hidden;
        tracing::debug!(modal = modal.element_id(), "modal opened");
    }

    /// Close one modal. Returns false if it was not open.
    pub fn close(&mut self, modal: ModalId) -> bool {
        if !self.open.remove(&modal) {
            return false;
        }
        if self.open.is_empty() {
            self.overflow = self.saved_overflow.take().unwrap_or_default();
        }
        tracing::debug!(modal = modal.element_id(), "modal closed");
        true
    }

    /// Backdrop dismissal: only a click on the modal root closes it.
    pub fn click(&mut self, modal: ModalId, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Root => self.close(modal),
            ClickTarget::Content => false,
        }
    }

    /// Global cancel key: closes the first open modal in document order.
    pub fn cancel(&mut self) -> Option<ModalId> {
        let active = self.active()?;
        self.close(active);
        Some(active)
    }

    pub fn is_open(&self, modal: ModalId) -> bool {
        self.open.contains(&modal)
    }

    /// First open modal in document order.
    pub fn active(&self) -> Option<ModalId> {
        self.open.iter().next().copied()
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn scroll_locked(&self) -> bool {
        self.overflow == Overflow::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_locks_and_close_restores_scroll() {
        let mut modals = ModalManager::default();
        modals.open(ModalId::JobSeeker);
        assert!(modals.is_open(ModalId::JobSeeker));
        assert!(modals.scroll_locked());

        assert!(modals.close(ModalId::JobSeeker));
        assert!(!modals.is_open(ModalId::JobSeeker));
        assert_eq!(modals.overflow(), Overflow::Auto);
    }

    #[test]
    fn close_restores_prior_overflow_not_a_default() {
        let mut modals = ModalManager::new(Overflow::Hidden);
        modals.open(ModalId::Success);
        modals.close(ModalId::Success);
        assert_eq!(modals.overflow(), Overflow::Hidden);
    }

    #[test]
    fn backdrop_click_closes_but_content_click_does_not() {
        let mut modals = ModalManager::default();
        modals.open(ModalId::PostJob);

        assert!(!modals.click(ModalId::PostJob, ClickTarget::Content));
        assert!(modals.is_open(ModalId::PostJob));

        assert!(modals.click(ModalId::PostJob, ClickTarget::Root));
        assert!(!modals.is_open(ModalId::PostJob));
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn cancel_closes_first_open_modal_in_document_order() {
        let mut modals = ModalManager::default();
        modals.open(ModalId::Success);
        modals.open(ModalId::JobSeeker);

        assert_eq!(modals.cancel(), Some(ModalId::JobSeeker));
        assert!(modals.scroll_locked(), "success modal is still open");
        assert_eq!(modals.cancel(), Some(ModalId::Success));
        assert!(!modals.scroll_locked());
        assert_eq!(modals.cancel(), None);
    }

    #[test]
    fn reopening_an_open_modal_keeps_saved_overflow() {
        let mut modals = ModalManager::default();
        modals.open(ModalId::JobSeeker);
        modals.open(ModalId::JobSeeker);
        modals.close(ModalId::JobSeeker);
        assert_eq!(modals.overflow(), Overflow::Auto);
    }

    #[test]
    fn closing_a_closed_modal_is_a_no_op() {
        let mut modals = ModalManager::default();
        assert!(!modals.close(ModalId::Success));
        assert_eq!(modals.overflow(), Overflow::Auto);
    }
}
