//! `[[page]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[page]]
//! site = "example.com"        # host or host:port, default site when omitted
//! url = "/blog/hello/"
//! title = "Hello"
//! owner = { username = "jdoe", first_name = "Jane", last_name = "Doe" }
//! first_published_at = "2024-06-01T09:00:00Z"
//!
//! [page.seo]
//! noindex = false
//! og_image = "/media/hello.jpg"
//!
//! [page.seo.schema_data]
//! types = ["BlogPosting"]
//! properties = { BlogPosting = { keywords = "hello" } }
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::config::section::settings::{is_http_url, is_valid_locale};
use crate::core::UrlPath;
use crate::page::{Owner, SeoFields};
use crate::utils::date::DateTimeUtc;

/// Schema types emitted site-wide, never per page.
pub const SITE_WIDE_TYPES: [&str; 3] = ["WebSite", "Organization", "BreadcrumbList"];

/// A page record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "page")]
pub struct PageEntry {
    /// Owning site as `host` or `host:port`.
    pub site: Option<String>,

    /// Site-relative URL path.
    #[config(default = "/", inline_doc)]
    pub url: UrlPath,

    /// Page title.
    #[config(inline_doc)]
    pub title: String,

    /// Title override for search engines and social cards.
    #[config(inline_doc)]
    pub seo_title: String,

    /// Meta description.
    #[config(inline_doc)]
    pub search_description: String,

    /// Unpublished pages are skipped in breadcrumbs and the sitemap.
    #[config(default = "true", inline_doc)]
    pub live: bool,

    /// Page owner, credited as article author.
    pub owner: Option<Owner>,

    /// First publication, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`.
    pub first_published_at: Option<DateTimeUtc>,

    /// Latest publication.
    pub last_published_at: Option<DateTimeUtc>,

    /// Page locale such as `ja_JP`; empty uses the site default.
    #[config(inline_doc)]
    pub locale: String,

    /// SEO fields (`[page.seo]`).
    #[config(skip)]
    pub seo: Option<SeoFields>,
}

impl Default for PageEntry {
    fn default() -> Self {
        Self {
            site: None,
            url: UrlPath::root(),
            title: String::new(),
            seo_title: String::new(),
            search_description: String::new(),
            live: true,
            owner: None,
            first_published_at: None,
            last_published_at: None,
            locale: String::new(),
            seo: None,
        }
    }
}

impl PageEntry {
    /// Checks that need nothing but the entry itself.
    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn(
                Self::FIELDS.title.at_index(index),
                format!("page `{}` has no title", self.url),
            );
        }

        if !self.locale.is_empty() && !is_valid_locale(&self.locale) {
            diag.error_with_hint(
                Self::FIELDS.locale.at_index(index),
                format!("unsupported locale `{}`", self.locale),
                "use language_COUNTRY, e.g. \"en_US\" or \"ja_JP\"",
            );
        }

        if let (Some(first), Some(last)) = (self.first_published_at, self.last_published_at)
            && last < first
        {
            diag.warn(
                Self::FIELDS.last_published_at.at_index(index),
                format!("last published {last} is before first published {first}"),
            );
        }

        if let Some(seo) = &self.seo {
            Self::validate_seo(seo, index, diag);
        }
    }

    fn validate_seo(seo: &SeoFields, index: usize, diag: &mut ConfigDiagnostics) {
        if !seo.canonical_url.is_empty() && !is_http_url(&seo.canonical_url) {
            diag.error_with_hint(
                FieldPath::indexed("page", index, "seo.canonical_url"),
                format!("`{}` is not an absolute http(s) URL", seo.canonical_url),
                "use a full URL such as \"https://example.com/page/\"",
            );
        }

        let schema = &seo.schema_data;
        for ty in &schema.types {
            if SITE_WIDE_TYPES.contains(&ty.as_str()) {
                diag.warn(
                    FieldPath::indexed("page", index, "seo.schema_data.types"),
                    format!("`{ty}` is emitted site-wide, ignored here"),
                );
            }
        }
        for key in schema.properties.keys() {
            if !schema.types.iter().any(|ty| ty == key) {
                diag.warn(
                    FieldPath::indexed("page", index, "seo.schema_data.properties"),
                    format!("properties for `{key}` are unused, `{key}` is not in types"),
                );
            }
        }
    }
}
