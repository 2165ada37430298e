//! Configuration management for `herald.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── serve      # [serve]
//! │   ├── media      # [media]
//! │   ├── site       # [[site]]
//! │   ├── settings   # [site.settings]
//! │   └── page       # [[page]]
//! ├── types/         # Diagnostics, field paths, field status
//! └── mod.rs         # HeraldConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section           | Purpose                                         |
//! |-------------------|-------------------------------------------------|
//! | `[serve]`         | Preview server (interface, port)                |
//! | `[media]`         | Original images, rendition output               |
//! | `[[site]]`        | Hostnames, site names, default site             |
//! | `[site.settings]` | Per-site SEO settings and text file bodies      |
//! | `[[page]]`        | Pages, their SEO fields and schema data         |

pub mod section;
pub mod types;
mod util;

pub use util::find_config_file;

// Re-export from section/
pub use section::{
    MediaConfig, OrganizationType, PageEntry, SITE_WIDE_TYPES, SeoSettings, ServeConfig, SiteEntry,
};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::image::{FsRenditions, Originals, Renditions};
use crate::log;
use crate::page::PageTree;
use crate::site::{SiteError, SiteRegistry};
use anyhow::{Result, bail};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "herald.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing herald.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Accept experimental fields without hints.
    #[serde(default)]
    pub allow_experimental: bool,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Media and rendition settings
    #[serde(default)]
    pub media: MediaConfig,

    /// Sites, each with optional `[site.settings]`
    #[serde(default)]
    pub site: Vec<SiteEntry>,

    /// Page records
    #[serde(default)]
    pub page: Vec<PageEntry>,
}

impl HeraldConfig {
    /// Locate, parse and validate the config.
    ///
    /// Searches upward from cwd for `config_name`. The project root is the
    /// config file's parent directory.
    pub fn load(config_name: &Path) -> Result<Self> {
        let config = Self::read(config_name)?;
        config.validate()?;
        Ok(config)
    }

    /// Locate and parse the config without validating it.
    pub fn read(config_name: &Path) -> Result<Self> {
        let Some(config_path) = find_config_file(config_name) else {
            bail!(ConfigError::Validation(format!(
                "config file `{}` not found, run `herald init` to create one",
                config_name.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    // ========================================================================
    // collaborators
    // ========================================================================

    /// Sites with their settings records.
    pub fn sites(&self) -> SiteRegistry {
        SiteRegistry::from_entries(&self.site)
    }

    /// The page tree of every site.
    pub fn pages(&self, sites: &SiteRegistry) -> Result<PageTree, SiteError> {
        PageTree::build(sites, &self.page)
    }

    /// Rendition backend: resized files when enabled, originals otherwise.
    pub fn renditions(&self) -> Box<dyn Renditions> {
        if self.media.renditions {
            Box::new(FsRenditions::from_config(&self.media, &self.root))
        } else {
            Box::new(Originals)
        }
    }

    // ========================================================================
    // starter config
    // ========================================================================

    /// Commented starter config written by `herald init`.
    pub fn template() -> String {
        let mut out = String::from("# herald configuration\n\n");
        out.push_str(&ServeConfig::template_with_header());
        out.push('\n');
        out.push_str(&MediaConfig::template_with_header());
        out.push('\n');
        push_array_table(&mut out, SiteEntry::TEMPLATE_DOC, "site", &SiteEntry::template());
        out.push('\n');
        out.push_str(&SeoSettings::template_with_header());
        out.push('\n');
        push_array_table(&mut out, PageEntry::TEMPLATE_DOC, "page", &PageEntry::template());
        out
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole config.
    ///
    /// Prints hints and warnings, and returns all errors at once.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnose();
        diag.print_hints_and_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Collect every diagnostic without printing anything.
    pub fn diagnose(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::with_allow_experimental(self.allow_experimental);

        // Validate field status (experimental, deprecated, not_implemented)
        self.serve.validate_field_status(&mut diag);
        self.media.validate_field_status(&mut diag);

        // Validate each section
        self.media.validate(&mut diag);
        SiteEntry::validate_all(&self.site, &mut diag);
        self.validate_pages(&mut diag);

        diag
    }

    /// Page checks that need the site registry or other pages.
    fn validate_pages(&self, diag: &mut ConfigDiagnostics) {
        if !self.page.is_empty() && self.site.is_empty() {
            diag.error_with_hint(
                FieldPath::new("site"),
                "pages are configured but no site is",
                "add a [[site]] entry",
            );
            return;
        }

        let sites = self.sites();
        let mut seen = FxHashSet::default();
        let mut resolved = FxHashMap::default();

        for (index, entry) in self.page.iter().enumerate() {
            entry.validate(index, diag);

            let site = match sites.site_for_entry(entry.site.as_deref()) {
                Ok(site) => site,
                Err(err) => {
                    diag.error_with_hint(
                        PageEntry::FIELDS.site.at_index(index),
                        err.to_string(),
                        "name a configured [[site]] as `host` or `host:port`",
                    );
                    continue;
                }
            };

            if !seen.insert((site, entry.url.clone())) {
                diag.error(
                    PageEntry::FIELDS.url.at_index(index),
                    format!("page `{}` is declared twice for this site", entry.url),
                );
                continue;
            }
            resolved.insert(index, site);
        }

        for (index, entry) in self.page.iter().enumerate() {
            let Some(&site) = resolved.get(&index) else {
                continue;
            };
            if let Some(parent) = entry.url.parent()
                && !seen.contains(&(site, parent.clone()))
            {
                diag.warn(
                    PageEntry::FIELDS.url.at_index(index),
                    format!("no page at `{parent}`, breadcrumbs skip it"),
                );
            }
        }
    }
}

/// Append an `[[array]]` table with its doc comment.
fn push_array_table(out: &mut String, doc: &str, name: &str, body: &str) {
    for line in doc.lines() {
        out.push_str("# ");
        out.push_str(line.trim());
        out.push('\n');
    }
    out.push_str("[[");
    out.push_str(name);
    out.push_str("]]\n");
    out.push_str(body);
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> HeraldConfig {
    let (parsed, ignored) = HeraldConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
