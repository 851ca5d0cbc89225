//! Interactive terminal preview of the page state.
//!
//! Keys: `t` or Ctrl/Cmd+Shift+T toggle the theme, `1`/`2` open the job seeker
//! and post job modals, `Esc` closes the front modal, `q` quits.

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use jobsnvisa::modal::ModalId;
use jobsnvisa::page::Page;
use jobsnvisa::preferences::PreferenceStore;
use jobsnvisa::site::{KeyAction, Site};
use std::io::{self, Write};

/// Restores cooked mode when the preview exits, even on error.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub fn run<S: PreferenceStore>(site: &mut Site<S>, color: bool) -> io::Result<()> {
    let _raw = RawModeGuard::enable()?;
    let mut out = io::stdout();
    let mut status = String::from("ready");
    loop {
        draw(&mut out, site.page(), &status, color)?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if is_quit(&key) {
            break;
        }
        status = match key.code {
            KeyCode::Char('1') => {
                site.open_modal(ModalId::JobSeeker);
                "opened job seeker modal".to_string()
            }
            KeyCode::Char('2') => {
                site.open_modal(ModalId::PostJob);
                "opened post job modal".to_string()
            }
            KeyCode::Char('t') if key.modifiers.is_empty() => {
                format!("theme: {}", site.toggle_theme())
            }
            _ => match site.handle_key(key) {
                KeyAction::ClosedModal(modal) => format!("closed {}", modal.element_id()),
                KeyAction::ToggledTheme(theme) => format!("theme: {theme}"),
                KeyAction::Ignored => status,
            },
        };
    }
    execute!(out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn draw(out: &mut impl Write, page: &Page, status: &str, color: bool) -> io::Result<()> {
    let theme = page.theme_marker.unwrap_or_default();
    if color {
        queue!(
            out,
            SetBackgroundColor(theme.background()),
            SetForegroundColor(theme.foreground())
        )?;
    }
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let active = page
        .modals
        .active()
        .map_or("none", ModalId::element_id);
    let lines = page_summary(page)
        .into_iter()
        .chain([
            format!("front modal: {active}"),
            String::new(),
            format!("[t] toggle  [1] job seeker  [2] post job  [esc] close  [q] quit  | {status}"),
        ]);
    for (row, line) in lines.enumerate() {
        queue!(out, MoveTo(0, row as u16), Print(line))?;
    }
    if color {
        queue!(out, ResetColor)?;
    }
    out.flush()
}

/// Plain-text rendering of the theme-dependent page state.
pub fn page_summary(page: &Page) -> Vec<String> {
    let theme = page.theme_marker.unwrap_or_default();
    let mut lines = vec![
        format!("theme: {theme}"),
        format!(
            "meta theme-color: {}",
            page.meta_theme_color.as_deref().unwrap_or("-")
        ),
        format!(
            "toggle: {} ({})",
            page.toggle.icon_class, page.toggle.aria_label
        ),
    ];
    if let Some(logo) = &page.logo {
        lines.push(format!("logo: {}", logo.src));
    }
    if let Some(hero) = &page.hero_shape {
        lines.push(format!(
            "hero: {}",
            hero.background.as_deref().unwrap_or("-")
        ));
    }
    if let Some(glow) = page.cards.first().and_then(|card| card.hover_glow.as_deref()) {
        lines.push(format!("card glow ({} cards): {glow}", page.cards.len()));
    }
    lines.push(format!(
        "scroll: {}",
        if page.modals.scroll_locked() {
            "locked"
        } else {
            "free"
        }
    ));
    lines
}
