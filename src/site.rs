//! Startup wiring and user-event dispatch for the whole page.

use crate::api::SubmissionClient;
use crate::config::Config;
use crate::error::StartupError;
use crate::forms::{FormKind, FormPipeline, FormState, SubmitControl, SubmitOutcome, ValidationRules};
use crate::modal::{ClickTarget, ModalId};
use crate::page::Page;
use crate::preferences::{PreferenceStore, SystemPreference};
use crate::theme::observers::{default_observers, LogoUpdater};
use crate::theme::{Theme, ThemeController};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;

/// Knobs the site takes from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SiteOptions {
    pub rules: ValidationRules,
    pub submit_timeout: Duration,
}

impl SiteOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: config.validation.rules(),
            submit_timeout: config.endpoint.timeout(),
        }
    }
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ClosedModal(ModalId),
    ToggledTheme(Theme),
    Ignored,
}

#[derive(Debug)]
struct Pipelines {
    job_seeker: FormPipeline,
    job_posting: FormPipeline,
    contact: FormPipeline,
}

impl Pipelines {
    fn new(page: &Page, options: SiteOptions) -> Self {
        let build = |kind: FormKind| {
            FormPipeline::new(
                kind,
                page.submit_label(kind),
                options.rules,
                options.submit_timeout,
            )
        };
        Self {
            job_seeker: build(FormKind::JobSeeker),
            job_posting: build(FormKind::JobPosting),
            contact: build(FormKind::Contact),
        }
    }

    fn get(&self, kind: FormKind) -> &FormPipeline {
        match kind {
            FormKind::JobSeeker => &self.job_seeker,
            FormKind::JobPosting => &self.job_posting,
            FormKind::Contact => &self.contact,
        }
    }

    fn get_mut(&mut self, kind: FormKind) -> &mut FormPipeline {
        match kind {
            FormKind::JobSeeker => &mut self.job_seeker,
            FormKind::JobPosting => &mut self.job_posting,
            FormKind::Contact => &mut self.contact,
        }
    }
}

/// A started page with its theme controller, modals and form pipelines.
pub struct Site<S> {
    page: Page,
    theme: ThemeController<S>,
    pipelines: Pipelines,
    client: Arc<dyn SubmissionClient>,
}

impl<S: PreferenceStore> Site<S> {
    /// Check the page, subscribe the built-in observers, then apply the
    /// startup theme so the observers see it.
    pub fn start(
        html: &str,
        store: S,
        system: &dyn SystemPreference,
        client: Arc<dyn SubmissionClient>,
        options: SiteOptions,
    ) -> Result<Self, StartupError> {
        let mut page = Page::from_html(html)?;
        let mut theme = ThemeController::new(store);
        for observer in default_observers() {
            theme.subscribe(observer);
        }
        let initial = theme.initialize(&mut page, system);
        LogoUpdater::apply(&mut page, initial);

        let pipelines = Pipelines::new(&page, options);
        tracing::info!(theme = %initial, "site started");
        Ok(Self {
            page,
            theme,
            pipelines,
            client,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn theme(&self) -> Theme {
        ThemeController::<S>::current(&self.page)
    }

    pub fn controller_mut(&mut self) -> &mut ThemeController<S> {
        &mut self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.page)
    }

    pub fn on_system_preference_change(&mut self, prefers_dark: bool) -> bool {
        self.theme
            .on_system_preference_change(&mut self.page, prefers_dark)
    }

    /// Trigger button click.
    pub fn open_modal(&mut self, modal: ModalId) {
        self.page.modals.open(modal);
    }

    /// Explicit close control click.
    pub fn close_modal(&mut self, modal: ModalId) -> bool {
        self.page.modals.close(modal)
    }

    pub fn click_modal(&mut self, modal: ModalId, target: ClickTarget) -> bool {
        self.page.modals.click(modal, target)
    }

    /// Global key handler: Escape closes a modal; Ctrl/Cmd+Shift+T toggles
    /// the theme.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::Ignored;
        }
        if key.code == KeyCode::Esc {
            return self
                .page
                .modals
                .cancel()
                .map_or(KeyAction::Ignored, KeyAction::ClosedModal);
        }
        if is_theme_shortcut(&key) {
            return KeyAction::ToggledTheme(self.toggle_theme());
        }
        KeyAction::Ignored
    }

    pub fn form(&self, kind: FormKind) -> &FormState {
        self.pipelines.get(kind).form()
    }

    pub fn form_mut(&mut self, kind: FormKind) -> &mut FormState {
        self.pipelines.get_mut(kind).form_mut()
    }

    pub fn control(&self, kind: FormKind) -> &SubmitControl {
        self.pipelines.get(kind).control()
    }

    /// Run one form's submit handler.
    pub async fn submit(&mut self, kind: FormKind) -> SubmitOutcome {
        self.pipelines
            .get_mut(kind)
            .submit(&mut self.page, self.client.as_ref())
            .await
    }
}

fn is_theme_shortcut(key: &KeyEvent) -> bool {
    let command = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::SUPER);
    let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
    command && shifted && matches!(key.code, KeyCode::Char('t' | 'T'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::BUNDLED_PAGE_HTML;
    use crate::preferences::{MemoryPreferenceStore, StaticSystemPreference};
    use crate::testsupport::{Reply, ScriptedClient};
    use crate::theme::THEME_KEY;

    fn start(store: MemoryPreferenceStore, prefers_dark: bool) -> Site<MemoryPreferenceStore> {
        Site::start(
            BUNDLED_PAGE_HTML,
            store,
            &StaticSystemPreference(prefers_dark),
            Arc::new(ScriptedClient::new([])),
            SiteOptions::default(),
        )
        .expect("site starts")
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn startup_theme_reaches_every_observer() {
        let site = start(MemoryPreferenceStore::new(), true);
        let page = site.page();
        assert_eq!(site.theme(), Theme::Dark);
        assert_eq!(page.logo.as_ref().map(|l| l.src.as_str()), Some("dark.svg"));
        assert_eq!(
            page.hero_shape.as_ref().and_then(|h| h.background.as_deref()),
            Some("linear-gradient(135deg, #1E3A8A, #3B82F6)")
        );
        assert!(page
            .cards
            .iter()
            .all(|card| card.hover_glow.as_deref() == Some("0 0 20px rgba(34, 197, 94, 0.2)")));
        assert_eq!(page.meta_theme_color.as_deref(), Some("#0F172A"));
    }

    #[test]
    fn broken_page_refuses_to_start() {
        let html = BUNDLED_PAGE_HTML.replace("id=\"successModal\"", "id=\"gone\"");
        let err = Site::start(
            &html,
            MemoryPreferenceStore::new(),
            &StaticSystemPreference(false),
            Arc::new(ScriptedClient::new([])),
            SiteOptions::default(),
        )
        .err()
        .expect("missing modal");
        assert_eq!(err, StartupError::MissingElement("#successModal".to_string()));
    }

    #[test]
    fn escape_closes_first_open_modal() {
        let mut site = start(MemoryPreferenceStore::new(), false);
        site.open_modal(ModalId::PostJob);
        site.open_modal(ModalId::JobSeeker);

        assert_eq!(
            site.handle_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            KeyAction::ClosedModal(ModalId::JobSeeker)
        );
        assert!(site.page().modals.scroll_locked());
        assert_eq!(
            site.handle_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            KeyAction::ClosedModal(ModalId::PostJob)
        );
        assert!(!site.page().modals.scroll_locked());
        assert_eq!(
            site.handle_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            KeyAction::Ignored
        );
    }

    #[test]
    fn shortcut_toggles_and_persists() {
        let mut site = start(MemoryPreferenceStore::new(), false);
        let action = site.handle_key(key(
            KeyCode::Char('T'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ));
        assert_eq!(action, KeyAction::ToggledTheme(Theme::Dark));
        assert_eq!(
            site.controller_mut().store().get(THEME_KEY).expect("get").as_deref(),
            Some("dark")
        );

        let action = site.handle_key(key(
            KeyCode::Char('t'),
            KeyModifiers::SUPER | KeyModifiers::SHIFT,
        ));
        assert_eq!(action, KeyAction::ToggledTheme(Theme::Light));
    }

    #[test]
    fn plain_t_is_not_the_shortcut() {
        let mut site = start(MemoryPreferenceStore::new(), false);
        assert_eq!(
            site.handle_key(key(KeyCode::Char('t'), KeyModifiers::CONTROL)),
            KeyAction::Ignored
        );
        assert_eq!(site.theme(), Theme::Light);
    }

    #[test]
    fn backdrop_click_only_closes_on_root() {
        let mut site = start(MemoryPreferenceStore::new(), false);
        site.open_modal(ModalId::JobSeeker);
        assert!(!site.click_modal(ModalId::JobSeeker, ClickTarget::Content));
        assert!(site.click_modal(ModalId::JobSeeker, ClickTarget::Root));
        assert!(!site.close_modal(ModalId::JobSeeker));
    }

    #[test]
    fn system_change_ignored_after_toggle() {
        let mut site = start(MemoryPreferenceStore::new(), false);
        assert!(site.on_system_preference_change(true));
        assert_eq!(site.theme(), Theme::Dark);
        site.toggle_theme();
        assert!(!site.on_system_preference_change(true));
        assert_eq!(site.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn forms_submit_independently() {
        let client = Arc::new(ScriptedClient::new([Reply::Reject, Reply::Accept]));
        let mut site = Site::start(
            BUNDLED_PAGE_HTML,
            MemoryPreferenceStore::new(),
            &StaticSystemPreference(false),
            client.clone(),
            SiteOptions::default(),
        )
        .expect("site starts");

        let contact = site.form_mut(FormKind::Contact);
        contact.set("name", "Asha");
        contact.set("email", "asha@example.com");
        contact.set("message", "Hi");
        let posting = site.form_mut(FormKind::JobPosting);
        for (field, value) in [
            ("business_name", "Acme Care"),
            ("contact_person", "Jo"),
            ("email", "jo@acme.test"),
            ("phone", "+44 20 7946 0000"),
            ("job_title", "Care Assistant"),
        ] {
            posting.set(field, value);
        }
        site.open_modal(ModalId::PostJob);

        let first = site.submit(FormKind::Contact).await;
        assert!(matches!(first, SubmitOutcome::Failed(_)));
        assert_eq!(site.form(FormKind::Contact).get("name"), "Asha");

        let second = site.submit(FormKind::JobPosting).await;
        assert!(second.is_submitted());
        assert!(!site.page().modals.is_open(ModalId::PostJob));
        assert!(site.page().modals.is_open(ModalId::Success));
        assert_eq!(
            site.page().success_message,
            FormKind::JobPosting.success_message()
        );
        assert!(site
            .page()
            .success_message
            .starts_with("Your job posting has been submitted successfully!"));
        assert!(site.form(FormKind::JobPosting).is_empty());
        assert_eq!(site.control(FormKind::Contact).label(), "Send Message");
        assert_eq!(client.calls().len(), 2);
    }
}
