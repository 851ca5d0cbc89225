//! Synchronous publish/subscribe for theme transitions.
//!
//! Subscribers are called in registration order on the caller's stack. There
//! is no queueing and no retry: an event reaches whoever is subscribed at the
//! moment it is published.

use super::Theme;
use crate::page::Page;

/// Message broadcast after the page theme marker changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChangeEvent {
    pub theme: Theme,
}

/// Handle returned by [`ThemeBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Read-only consumer of theme transitions.
///
/// Observers only touch their own presentation slot on the page; they never
/// see the preference store. Receiving the same theme twice must leave the
/// page unchanged.
pub trait ThemeObserver {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
    fn on_theme_changed(&self, page: &mut Page, event: &ThemeChangeEvent);
}

impl<F> ThemeObserver for F
where
    F: Fn(&mut Page, &ThemeChangeEvent),
{
    fn name(&self) -> &'static str {
        "closure"
    }

    fn on_theme_changed(&self, page: &mut Page, event: &ThemeChangeEvent) {
        self(page, event)
    }
}

/// Ordered observer registry.
#[derive(Default)]
pub struct ThemeBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn ThemeObserver>)>,
}

impl ThemeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn ThemeObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        tracing::debug!(observer = observer.name(), id = id.0, "theme observer subscribed");
        self.subscribers.push((id, observer));
        id
    }

    /// Remove one subscriber. Returns false for unknown or already removed ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        before != self.subscribers.len()
    }

    /// Deliver `event` to every current subscriber; returns how many ran.
    pub fn publish(&self, page: &mut Page, event: &ThemeChangeEvent) -> usize {
        for (_, observer) in &self.subscribers {
            observer.on_theme_changed(page, event);
        }
        self.subscribers.len()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for ThemeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.subscribers.iter().map(|(_, o)| o.name()).collect();
        f.debug_struct("ThemeBus").field("subscribers", &names).finish()
    }
}
