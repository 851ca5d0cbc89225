//! Theme controller: owns the persisted choice and broadcasts transitions.

use super::bus::{SubscriptionId, ThemeBus, ThemeChangeEvent, ThemeObserver};
use super::{Theme, ThemeToken};
use crate::page::Page;
use crate::preferences::{PreferenceStore, SystemPreference};

/// Preference slot holding the user's explicit choice.
pub const THEME_KEY: &str = "theme";

/// Applies themes to a [`Page`] and fans changes out through a [`ThemeBus`].
///
/// A value in the `theme` slot marks the preference as user-set. From then
/// on, system preference changes are ignored.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    bus: ThemeBus,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            bus: ThemeBus::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn subscribe(&mut self, observer: Box<dyn ThemeObserver>) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Current theme as marked on the page; unset reads as light.
    pub fn current(page: &Page) -> Theme {
        page.theme_marker.unwrap_or_default()
    }

    /// Apply the startup theme: persisted choice first, then the system signal.
    pub fn initialize(&mut self, page: &mut Page, system: &dyn SystemPreference) -> Theme {
        let saved = match self.store.get(THEME_KEY) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read saved theme; using system preference");
                None
            }
        };
        let theme = match saved.as_deref().map(Theme::parse) {
            Some(Some(theme)) => theme,
            Some(None) => {
                tracing::warn!(value = ?saved, "ignoring unknown saved theme");
                Theme::from_prefers_dark(system.prefers_dark())
            }
            None => Theme::from_prefers_dark(system.prefers_dark()),
        };
        self.apply_theme(page, theme);
        theme
    }

    /// Flip the theme, persist it as the user's choice, and apply it.
    pub fn toggle(&mut self, page: &mut Page) -> Theme {
        let next = Self::current(page).toggled();
        self.apply_theme(page, next);
        if let Err(err) = self.store.set(THEME_KEY, next.as_str()) {
            tracing::warn!(error = %err, theme = %next, "theme switched, but persistence failed");
        }
        next
    }

    /// Set the page marker, toggle chrome, and meta color, then notify observers.
    pub fn apply_theme(&mut self, page: &mut Page, theme: Theme) {
        page.theme_marker = Some(theme);
        page.toggle.icon_class = theme.token(ThemeToken::ToggleIcon).to_string();
        page.toggle.aria_label = theme.token(ThemeToken::ToggleLabel).to_string();
        // Created on demand when the page did not declare one.
        page.meta_theme_color = Some(theme.token(ThemeToken::MetaColor).to_string());

        let delivered = self.bus.publish(page, &ThemeChangeEvent { theme });
        tracing::debug!(theme = %theme, observers = delivered, "theme applied");
    }

    /// React to a live system preference change.
    ///
    /// Returns whether the page theme was changed. Any saved value, even an
    /// unreadable one, counts as a user choice and blocks the change.
    pub fn on_system_preference_change(&mut self, page: &mut Page, prefers_dark: bool) -> bool {
        if self.has_user_preference() {
            tracing::debug!(prefers_dark, "system theme change ignored; user preference set");
            return false;
        }
        self.apply_theme(page, Theme::from_prefers_dark(prefers_dark));
        true
    }

    fn has_user_preference(&self) -> bool {
        match self.store.get(THEME_KEY) {
            Ok(value) => value.is_some(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read saved theme; keeping current theme");
                true
            }
        }
    }
}
