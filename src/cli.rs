//! CLI argument parsing via clap.

use clap::{Parser, Subcommand, ValueEnum};
use jobsnvisa::forms::{Attachment, FormKind};
use jobsnvisa::theme::Theme;

/// Drive the JobsNVisa site core from the terminal.
#[derive(Debug, Parser)]
#[command(name = "jobsnvisa", disable_version_flag = true)]
pub struct Args {
    /// Path to config file (default: ./jobsnvisa.toml or ~/.config/jobsnvisa/jobsnvisa.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Site markup to load instead of the bundled page.
    #[arg(long = "page", global = true)]
    pub page: Option<String>,

    /// Force the host color-scheme signal instead of detecting it.
    #[arg(long = "system-theme", value_enum, global = true)]
    pub system_theme: Option<ThemeArg>,

    /// Keep the theme choice in memory only; nothing is written to disk.
    #[arg(long = "ephemeral", global = true)]
    pub ephemeral: bool,

    /// Print version and build metadata.
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or change the site theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Submit one of the site forms to the configured endpoint.
    Submit {
        #[arg(value_enum)]
        form: FormArg,
        /// Field value as `name=value`; repeatable.
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Résumé indicator as `NAME:BYTES` (job seeker form only).
        #[arg(long = "attachment", value_parser = parse_attachment)]
        attachment: Option<Attachment>,
    },
    /// Interactive page preview driven by key presses.
    Preview,
    /// Print the commented default config.
    Config,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the active theme and the page state it produced.
    Show,
    /// Flip the theme and save the choice.
    Toggle,
    /// Simulate a live host color-scheme change.
    System {
        #[arg(value_enum)]
        scheme: ThemeArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormArg {
    JobSeeker,
    JobPosting,
    Contact,
}

impl From<FormArg> for FormKind {
    fn from(value: FormArg) -> Self {
        match value {
            FormArg::JobSeeker => FormKind::JobSeeker,
            FormArg::JobPosting => FormKind::JobPosting,
            FormArg::Contact => FormKind::Contact,
        }
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn parse_attachment(raw: &str) -> Result<Attachment, String> {
    let (name, size) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected `NAME:BYTES`, got `{raw}`"))?;
    let size_bytes = size
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid byte count `{size}`"))?;
    Ok(Attachment {
        name: name.trim().to_string(),
        size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_parses_repeated_fields() {
        let args = Args::parse_from([
            "jobsnvisa",
            "submit",
            "contact",
            "--field",
            "name=Asha",
            "-f",
            "message=a=b",
        ]);
        match args.command {
            Some(Command::Submit { form, fields, .. }) => {
                assert_eq!(form, FormArg::Contact);
                assert_eq!(
                    fields,
                    vec![
                        ("name".to_string(), "Asha".to_string()),
                        ("message".to_string(), "a=b".to_string()),
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn attachment_parses_name_and_size() {
        let args = Args::parse_from([
            "jobsnvisa",
            "submit",
            "job-seeker",
            "--attachment",
            "my:cv.pdf:1048576",
        ]);
        match args.command {
            Some(Command::Submit { attachment, .. }) => {
                let attachment = attachment.expect("attachment");
                assert_eq!(attachment.name, "my:cv.pdf");
                assert_eq!(attachment.size_bytes, 1_048_576);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Args::parse_from([
            "jobsnvisa",
            "theme",
            "toggle",
            "--ephemeral",
            "--system-theme",
            "dark",
        ]);
        assert!(args.ephemeral);
        assert_eq!(args.system_theme, Some(ThemeArg::Dark));
        assert!(matches!(
            args.command,
            Some(Command::Theme {
                action: ThemeAction::Toggle
            })
        ));
    }

    #[test]
    fn malformed_field_is_rejected() {
        let err = Args::try_parse_from(["jobsnvisa", "submit", "contact", "-f", "nonsense"])
            .expect_err("field without =");
        assert!(err.to_string().contains("name=value"));
    }
}
