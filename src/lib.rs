//! JobsNVisa site core: theme switching, lead-capture forms and modals.
//!
//! A [`site::Site`] owns the [`page::Page`] state and wires the
//! [`theme::ThemeController`], the modal manager and one
//! [`forms::FormPipeline`] per form. Storage and network access sit behind
//! the [`preferences::PreferenceStore`] and [`api::SubmissionClient`] traits.
//!
//! # Quick start
//!
//! ```no_run
//! use jobsnvisa::api::HttpSubmissionClient;
//! use jobsnvisa::config::load_config;
//! use jobsnvisa::forms::FormKind;
//! use jobsnvisa::page::BUNDLED_PAGE_HTML;
//! use jobsnvisa::preferences::{EnvSystemPreference, MemoryPreferenceStore};
//! use jobsnvisa::site::{Site, SiteOptions};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let client = Arc::new(HttpSubmissionClient::new(&config.endpoint));
//! let mut site = Site::start(
//!     BUNDLED_PAGE_HTML,
//!     MemoryPreferenceStore::new(),
//!     &EnvSystemPreference::from_env(),
//!     client,
//!     SiteOptions::from_config(&config),
//! )
//! .unwrap();
//! site.toggle_theme();
//! let outcome = site.submit(FormKind::Contact).await;
//! println!("{outcome:?}");
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod forms;
pub mod modal;
pub mod page;
pub mod preferences;
pub mod site;
#[cfg(test)]
pub mod testsupport;
pub mod theme;
