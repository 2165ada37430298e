//! Page types: the page record, its SEO fields, and the page tree.
//!
//! Content types opt into SEO by embedding a [`SeoFields`] record
//! (`Page::seo`). Pages without it still get titles, descriptions and
//! breadcrumbs, but no robots directive, overrides or page-declared schemas.

mod schema_data;
mod tree;

pub use schema_data::SchemaData;
pub use tree::PageTree;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::UrlPath;
use crate::image::Image;
use crate::site::SiteId;
use crate::utils::date::DateTimeUtc;

/// A JSON object map for schema mappings and override properties.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Depth of the invisible tree root. Site home pages sit one level below.
pub const ROOT_DEPTH: usize = 1;

/// SEO fields a content type embeds by composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoFields {
    /// Overrides the site-wide default Open Graph image.
    pub og_image: Option<Image>,
    /// Alt text for `og_image`; falls back to the image title.
    pub og_image_alt: String,
    pub noindex: bool,
    pub nofollow: bool,
    /// Absolute canonical URL override.
    pub canonical_url: String,
    pub schema_data: SchemaData,
}

/// The user who owns a page, credited as article author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl Owner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Full name, else username.
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Username(String),
            Table {
                username: String,
                #[serde(default)]
                first_name: String,
                #[serde(default)]
                last_name: String,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Username(username) => Self {
                username,
                ..Self::default()
            },
            Raw::Table {
                username,
                first_name,
                last_name,
            } => Self {
                username,
                first_name,
                last_name,
            },
        })
    }
}

/// A page above the current one in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub title: String,
    /// Site-relative URL. The tree root has none.
    pub url: Option<UrlPath>,
    pub depth: usize,
    pub live: bool,
}

impl Ancestor {
    /// The invisible node every site home hangs from.
    pub fn root() -> Self {
        Self {
            title: "Root".to_string(),
            url: None,
            depth: ROOT_DEPTH,
            live: true,
        }
    }
}

/// A page as the SEO builders see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub site: SiteId,
    /// Site-relative URL, e.g. `/blog/hello/`.
    pub url: UrlPath,
    /// Precomputed absolute URL from the site's root URL.
    pub full_url: String,
    pub title: String,
    pub seo_title: String,
    pub search_description: String,
    /// Tree depth: root is 1, the site home 2, `/blog/` 3.
    pub depth: usize,
    /// Chain from the tree root down to the parent, in order.
    pub ancestors: Vec<Ancestor>,
    pub live: bool,
    pub owner: Option<Owner>,
    pub first_published_at: Option<DateTimeUtc>,
    pub last_published_at: Option<DateTimeUtc>,
    /// Page-level locale such as `ja_JP`; empty means "use the site default".
    pub locale: String,
    pub seo: Option<SeoFields>,
}

impl Page {
    /// A live page without ancestors, depth derived from its URL.
    pub fn new(site: SiteId, url: impl Into<UrlPath>, title: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            site,
            depth: depth_of(&url),
            full_url: String::new(),
            url,
            title: title.into(),
            seo_title: String::new(),
            search_description: String::new(),
            ancestors: Vec::new(),
            live: true,
            owner: None,
            first_published_at: None,
            last_published_at: None,
            locale: String::new(),
            seo: None,
        }
    }

    pub fn with_seo(mut self, seo: SeoFields) -> Self {
        self.seo = Some(seo);
        self
    }

    /// Whether search engines may index this page.
    pub fn is_indexable(&self) -> bool {
        self.seo.as_ref().is_none_or(|seo| !seo.noindex)
    }
}

/// Tree depth for a site-relative URL: `/` is 2, each segment adds one.
pub fn depth_of(url: &UrlPath) -> usize {
    ROOT_DEPTH + 1 + url.segments().count()
}
