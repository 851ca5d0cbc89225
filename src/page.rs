//! The page state holder shared by the theme controller, observers, modals
//! and form pipelines.
//!
//! A [`Page`] is built once from the site HTML. Every interactive element the
//! handlers rely on is checked up front so a broken page fails at startup with
//! the missing selector instead of deep inside a handler.

use crate::error::StartupError;
use crate::forms::FormKind;
use crate::modal::{ModalId, ModalManager};
use crate::theme::Theme;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Site markup compiled into the binary.
pub const BUNDLED_PAGE_HTML: &str = include_str!("templates/index.html");

const THEME_TOGGLE_SELECTOR: &str = "#themeToggle";
const SUCCESS_MESSAGE_SELECTOR: &str = "#successMessage";

const CARD_SELECTOR: &str = ".industry-card, .service-card, .reason-card";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub icon_class: String,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroShape {
    /// Inline background override; `None` leaves the stylesheet value.
    pub background: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Industry,
    Service,
    Reason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub kind: CardKind,
    /// `--hover-glow` custom property.
    pub hover_glow: Option<String>,
}

/// Mutable presentation state of the single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// `data-theme` on the document root.
    pub theme_marker: Option<Theme>,
    /// `<meta name="theme-color">` content; `None` until one exists.
    pub meta_theme_color: Option<String>,
    pub toggle: ToggleButton,
    pub logo: Option<Logo>,
    pub hero_shape: Option<HeroShape>,
    pub cards: Vec<Card>,
    pub modals: ModalManager,
    pub success_message: String,
    /// User-visible alerts, oldest first.
    pub alerts: Vec<String>,
    submit_labels: BTreeMap<FormKind, String>,
}

impl Page {
    /// Parse site markup and check that every required element exists.
    pub fn from_html(html: &str) -> Result<Self, StartupError> {
        let doc = Html::parse_document(html);
        for selector in required_selectors() {
            if first(&doc, &selector).is_none() {
                return Err(StartupError::MissingElement(selector));
            }
        }

        let theme_marker = first(&doc, "html[data-theme]")
            .and_then(|el| el.value().attr("data-theme"))
            .and_then(Theme::parse);
        let meta_theme_color = first(&doc, r#"meta[name="theme-color"]"#)
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string);
        let toggle = ToggleButton {
            icon_class: first(&doc, "#themeToggle i")
                .and_then(|el| el.value().attr("class"))
                .unwrap_or_default()
                .to_string(),
            aria_label: first(&doc, "#themeToggle")
                .and_then(|el| el.value().attr("aria-label"))
                .unwrap_or_default()
                .to_string(),
        };
        let logo = first(&doc, ".logo-image").map(|el| Logo {
            src: el.value().attr("src").unwrap_or_default().to_string(),
        });
        let hero_shape = first(&doc, ".hero-shape").map(|_| HeroShape { background: None });
        let cards = select_all(&doc, CARD_SELECTOR)
            .into_iter()
            .filter_map(|el| {
                let kind = el.value().classes().find_map(|class| match class {
                    "industry-card" => Some(CardKind::Industry),
                    "service-card" => Some(CardKind::Service),
                    "reason-card" => Some(CardKind::Reason),
                    _ => None,
                })?;
                Some(Card {
                    kind,
                    hover_glow: None,
                })
            })
            .collect();

        let mut submit_labels = BTreeMap::new();
        for kind in FormKind::all() {
            let selector = submit_selector(*kind);
            let label = first(&doc, &selector)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            submit_labels.insert(*kind, label);
        }

        Ok(Self {
            theme_marker,
            meta_theme_color,
            toggle,
            logo,
            hero_shape,
            cards,
            modals: ModalManager::default(),
            success_message: String::new(),
            alerts: Vec::new(),
            submit_labels,
        })
    }

    /// Page built from [`BUNDLED_PAGE_HTML`].
    pub fn bundled() -> Result<Self, StartupError> {
        Self::from_html(BUNDLED_PAGE_HTML)
    }

    /// Idle label of a form's submit control, as written in the markup.
    pub fn submit_label(&self, kind: FormKind) -> &str {
        self.submit_labels
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Set the success text and open the success modal.
    pub fn show_success(&mut self, message: &str) {
        self.success_message = message.to_string();
        self.modals.open(ModalId::Success);
    }

    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    /// Drain alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

fn select_all<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    Selector::parse(css)
        .map(|selector| doc.select(&selector).collect())
        .unwrap_or_default()
}

fn submit_selector(kind: FormKind) -> String {
    format!("#{} .btn-submit", kind.form_id())
}

/// Every element a handler reaches for, in document order.
fn required_selectors() -> Vec<String> {
    let modals = ModalId::all();
    let mut selectors = vec![THEME_TOGGLE_SELECTOR.to_string()];
    selectors.extend(
        modals
            .iter()
            .filter_map(|modal| modal.trigger_id())
            .map(|id| format!("#{id}")),
    );
    selectors.extend(modals.iter().map(|modal| format!("#{}", modal.element_id())));
    selectors.extend(
        modals
            .iter()
            .map(|modal| format!("#{}", modal.close_control_id())),
    );
    selectors.push(SUCCESS_MESSAGE_SELECTOR.to_string());
    selectors.extend(FormKind::all().iter().map(|kind| format!("#{}", kind.form_id())));
    selectors.extend(FormKind::all().iter().map(|kind| submit_selector(*kind)));
    selectors
}

fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    select_all(doc, css).into_iter().next()
}
