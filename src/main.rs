//! CLI entry point for jobsnvisa.

mod cli;
mod preview;

use clap::{CommandFactory, Parser};
use cli::{Args, Command, ThemeAction};
use jobsnvisa::api::HttpSubmissionClient;
use jobsnvisa::build_info::cli_version_text;
use jobsnvisa::config::{load_config, Config, SystemTheme};
use jobsnvisa::forms::FormKind;
use jobsnvisa::page::BUNDLED_PAGE_HTML;
use jobsnvisa::preferences::{
    EnvSystemPreference, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    StaticSystemPreference, SystemPreference,
};
use jobsnvisa::site::{Site, SiteOptions};
use jobsnvisa::theme::Theme;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    if args.version {
        println!("{}", cli_version_text());
        return;
    }
    let Some(command) = args.command.as_ref() else {
        let _ = Args::command().print_help();
        return;
    };
    if matches!(command, Command::Config) {
        print!("{}", jobsnvisa::config::config_template());
        return;
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(scheme) = args.system_theme {
        config.display.system_theme = match Theme::from(scheme) {
            Theme::Dark => SystemTheme::Dark,
            Theme::Light => SystemTheme::Light,
        };
    }

    let html = match &args.page {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("error: failed to read page `{path}`: {e}");
                std::process::exit(1);
            }
        },
        None => BUNDLED_PAGE_HTML.to_string(),
    };

    let store = preference_store(&config, args.ephemeral);
    let system = system_preference(&config);
    let client = Arc::new(HttpSubmissionClient::new(&config.endpoint));
    let mut site = match Site::start(
        &html,
        store.as_ref(),
        system.as_ref(),
        client,
        SiteOptions::from_config(&config),
    ) {
        Ok(site) => site,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let ok = match command {
        Command::Theme { action } => run_theme(&mut site, action),
        Command::Submit {
            form,
            fields,
            attachment,
        } => run_submit(&mut site, (*form).into(), fields, attachment.clone()).await,
        Command::Preview => match preview::run(&mut site, config.display.color) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("error: preview failed: {e}");
                false
            }
        },
        Command::Config => true,
    };
    if !ok {
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("JOBSNVISA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("jobsnvisa=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn preference_store(config: &Config, ephemeral: bool) -> Box<dyn PreferenceStore> {
    if ephemeral {
        return Box::new(MemoryPreferenceStore::new());
    }
    if let Some(path) = config.storage.preferences_path.as_deref() {
        return Box::new(FilePreferenceStore::new(path));
    }
    match FilePreferenceStore::default_location() {
        Some(store) => Box::new(store),
        None => {
            tracing::warn!("no config directory found; theme choice will not be saved");
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

fn system_preference(config: &Config) -> Box<dyn SystemPreference> {
    match config.display.system_theme {
        SystemTheme::Auto => Box::new(EnvSystemPreference::from_env()),
        SystemTheme::Dark => Box::new(StaticSystemPreference(true)),
        SystemTheme::Light => Box::new(StaticSystemPreference(false)),
    }
}

fn run_theme<S: PreferenceStore>(site: &mut Site<S>, action: &ThemeAction) -> bool {
    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            site.toggle_theme();
        }
        ThemeAction::System { scheme } => {
            let prefers_dark = Theme::from(*scheme).is_dark();
            if !site.on_system_preference_change(prefers_dark) {
                println!("saved theme choice kept; system change ignored");
            }
        }
    }
    for line in preview::page_summary(site.page()) {
        println!("{line}");
    }
    true
}

async fn run_submit<S: PreferenceStore>(
    site: &mut Site<S>,
    kind: FormKind,
    fields: &[(String, String)],
    attachment: Option<jobsnvisa::forms::Attachment>,
) -> bool {
    let form = site.form_mut(kind);
    for (name, value) in fields {
        if !form.set(name, value.as_str()) {
            eprintln!(
                "error: `{name}` is not a {} field (expected one of: {})",
                kind.slug(),
                kind.fields().join(", ")
            );
            return false;
        }
    }
    if let Some(file) = attachment {
        let label = file.label();
        if form.attach(file) {
            println!("attached {label}");
        } else {
            eprintln!("warning: the {} form has no file input", kind.slug());
        }
    }

    let outcome = site.submit(kind).await;
    for alert in site.page_mut().take_alerts() {
        eprintln!("{alert}");
    }
    if outcome.is_submitted() {
        println!("{}", site.page().success_message);
    }
    outcome.is_submitted()
}
