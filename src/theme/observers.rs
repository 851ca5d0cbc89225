//! Built-in theme observers for the logo, cards and hero shape.

use super::bus::{ThemeChangeEvent, ThemeObserver};
use super::{Theme, ThemeToken};
use crate::page::Page;

/// Swaps the logo image between `dark.svg` and `light.svg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoUpdater;

impl LogoUpdater {
    /// Also used once at startup, before any transition happens.
    pub fn apply(page: &mut Page, theme: Theme) {
        let Some(logo) = page.logo.as_mut() else {
            return;
        };
        logo.src = theme.token(ThemeToken::LogoSource).to_string();
    }
}

impl ThemeObserver for LogoUpdater {
    fn name(&self) -> &'static str {
        "logo"
    }

    fn on_theme_changed(&self, page: &mut Page, event: &ThemeChangeEvent) {
        Self::apply(page, event.theme);
    }
}

/// Sets the `--hover-glow` property on every industry/service/reason card.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardGlowStyler;

impl ThemeObserver for CardGlowStyler {
    fn name(&self) -> &'static str {
        "card-glow"
    }

    fn on_theme_changed(&self, page: &mut Page, event: &ThemeChangeEvent) {
        let glow = event.theme.token(ThemeToken::CardGlow);
        for card in &mut page.cards {
            card.hover_glow = Some(glow.to_string());
        }
    }
}

/// Repaints the hero shape gradient.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeroGradient;

impl ThemeObserver for HeroGradient {
    fn name(&self) -> &'static str {
        "hero-gradient"
    }

    fn on_theme_changed(&self, page: &mut Page, event: &ThemeChangeEvent) {
        if let Some(hero) = page.hero_shape.as_mut() {
            hero.background = Some(event.theme.token(ThemeToken::HeroGradient).to_string());
        }
    }
}

/// Observers every page gets, in subscription order.
pub fn default_observers() -> Vec<Box<dyn ThemeObserver>> {
    vec![
        Box::new(HeroGradient),
        Box::new(CardGlowStyler),
        Box::new(LogoUpdater),
    ]
}
