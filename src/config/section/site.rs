//! `[[site]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[site]]
//! hostname = "example.com"
//! port = 443
//! site_name = "Example"
//! is_default = true
//!
//! [site.settings]
//! organization_name = "Example Inc."
//!
//! [[site]]
//! hostname = "blog.example.com"
//! port = 443
//! ```

use macros::Config;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::SeoSettings;
use crate::config::ConfigDiagnostics;

/// A site served by this deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site")]
pub struct SiteEntry {
    /// Hostname requests are matched against.
    #[config(default = "localhost", inline_doc)]
    pub hostname: String,

    /// Port; 443 implies https, anything else http.
    #[config(default = "80", inline_doc)]
    pub port: u16,

    /// Human-readable site name, appended to page titles.
    #[config(inline_doc)]
    pub site_name: String,

    /// Serve this site when no hostname matches.
    #[config(inline_doc)]
    pub is_default: bool,

    /// Per-site SEO settings (`[site.settings]`).
    #[config(skip)]
    pub settings: Option<SeoSettings>,
}

impl Default for SiteEntry {
    fn default() -> Self {
        Self {
            hostname: "localhost".into(),
            port: 80,
            site_name: String::new(),
            is_default: false,
            settings: None,
        }
    }
}

impl SiteEntry {
    /// `host:port` label used in diagnostics and logs.
    pub fn label(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// Validate all site entries together.
    pub fn validate_all(sites: &[Self], diag: &mut ConfigDiagnostics) {
        let mut seen = FxHashSet::default();
        let mut defaults = Vec::new();

        for (index, site) in sites.iter().enumerate() {
            if site.hostname.trim().is_empty() {
                diag.error(
                    Self::FIELDS.hostname.at_index(index),
                    "hostname must not be empty",
                );
            }

            if !seen.insert((site.hostname.to_ascii_lowercase(), site.port)) {
                diag.error_with_hint(
                    Self::FIELDS.hostname.at_index(index),
                    format!("site `{}` is declared twice", site.label()),
                    "merge the entries or change the port",
                );
            }

            if site.is_default {
                defaults.push(index);
            }

            if let Some(settings) = &site.settings {
                settings.validate(index, diag);
            }
        }

        if let [_, rest @ ..] = defaults.as_slice() {
            for &index in rest {
                diag.error_with_hint(
                    Self::FIELDS.is_default.at_index(index),
                    "more than one default site",
                    "keep `is_default = true` on a single site",
                );
            }
        }
    }
}
