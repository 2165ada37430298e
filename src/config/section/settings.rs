//! `[site.settings]` configuration: the per-site SEO settings record.
//!
//! Each `[[site]]` owns zero or one settings table. Leaving it out is valid
//! and means "no settings configured": every dependent tag or schema is
//! simply omitted.
//!
//! # Example
//!
//! ```toml
//! [[site]]
//! hostname = "example.com"
//! port = 443
//! site_name = "Example"
//!
//! [site.settings]
//! organization_name = "Example Inc."
//! organization_type = "Corporation"
//! twitter_handle = "example"
//! default_og_image = "/media/og-default.png"
//! robots_txt = """
//! User-agent: *
//! Disallow: /admin/
//! """
//! ```

use std::fmt;
use std::sync::LazyLock;

use macros::Config;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::image::Image;

/// Schema.org type used for the site's Organization markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationType {
    #[default]
    Organization,
    Corporation,
    LocalBusiness,
    OnlineStore,
    #[serde(rename = "NGO")]
    Ngo,
    EducationalOrganization,
    GovernmentOrganization,
}

impl OrganizationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Corporation => "Corporation",
            Self::LocalBusiness => "LocalBusiness",
            Self::OnlineStore => "OnlineStore",
            Self::Ngo => "NGO",
            Self::EducationalOrganization => "EducationalOrganization",
            Self::GovernmentOrganization => "GovernmentOrganization",
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SEO settings for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site.settings")]
pub struct SeoSettings {
    /// Organization name, enables Organization markup when set.
    #[config(inline_doc)]
    pub organization_name: String,

    /// Schema.org organization type.
    #[config(default = "Organization", inline_doc = "Organization, Corporation, LocalBusiness, OnlineStore, NGO, EducationalOrganization, GovernmentOrganization")]
    pub organization_type: OrganizationType,

    /// Organization logo, rendered at 112x112.
    pub organization_logo: Option<Image>,

    /// Twitter handle without the leading `@`.
    #[config(inline_doc)]
    pub twitter_handle: String,

    /// Facebook page URL.
    #[config(inline_doc)]
    pub facebook_url: String,

    /// Separator between page title and site name.
    #[config(default = "|", inline_doc)]
    pub title_separator: String,

    /// Locale used when a page sets none.
    #[config(default = "en_US", inline_doc = "en_US, ja_JP, zh_CN, ...")]
    pub default_locale: String,

    /// Site-wide Open Graph image, rendered at 1200x630.
    pub default_og_image: Option<Image>,

    /// Alt text for the default Open Graph image.
    #[config(inline_doc)]
    pub default_og_image_alt: String,

    /// SVG favicon.
    pub favicon_svg: Option<Image>,

    /// PNG favicon.
    pub favicon_png: Option<Image>,

    /// Apple touch icon (180x180).
    pub apple_touch_icon: Option<Image>,

    /// Google Search Console verification code.
    #[config(inline_doc)]
    pub google_site_verification: String,

    /// Bing Webmaster Tools verification code.
    #[config(inline_doc)]
    pub bing_site_verification: String,

    /// Raw HTML appended to the head block.
    pub custom_head_html: String,

    /// robots.txt body; blank serves the generated default.
    pub robots_txt: String,

    /// ads.txt body; blank answers 404.
    pub ads_txt: String,

    /// security.txt body; blank answers 404.
    pub security_txt: String,
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            organization_type: OrganizationType::Organization,
            organization_logo: None,
            twitter_handle: String::new(),
            facebook_url: String::new(),
            title_separator: "|".into(),
            default_locale: "en_US".into(),
            default_og_image: None,
            default_og_image_alt: String::new(),
            favicon_svg: None,
            favicon_png: None,
            apple_touch_icon: None,
            google_site_verification: String::new(),
            bing_site_verification: String::new(),
            custom_head_html: String::new(),
            robots_txt: String::new(),
            ads_txt: String::new(),
            security_txt: String::new(),
        }
    }
}

static RE_TWITTER_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap());

static RE_LOCALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}_[A-Z]{2}$").unwrap());

/// Whether `locale` looks like `ll_CC` (`en_US`, `ja_JP`).
pub fn is_valid_locale(locale: &str) -> bool {
    RE_LOCALE.is_match(locale)
}

/// Whether `url` parses as an absolute http(s) URL.
pub fn is_http_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

impl SeoSettings {
    /// Validate the settings of `[[site]]` entry `index`.
    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        let handle = &self.twitter_handle;
        if let Some(bare) = handle.strip_prefix('@') {
            diag.error_with_hint(
                Self::FIELDS.twitter_handle.at_index(index),
                format!("twitter handle `{handle}` starts with `@`"),
                format!("write it without the `@`: \"{bare}\""),
            );
        } else if !handle.is_empty() && !RE_TWITTER_HANDLE.is_match(handle) {
            diag.error_with_hint(
                Self::FIELDS.twitter_handle.at_index(index),
                format!("`{handle}` is not a twitter handle"),
                "use 1-15 letters, digits or underscores",
            );
        }

        if !self.facebook_url.is_empty() && !is_http_url(&self.facebook_url) {
            diag.error_with_hint(
                Self::FIELDS.facebook_url.at_index(index),
                format!("`{}` is not an http(s) URL", self.facebook_url),
                "use a full URL such as \"https://facebook.com/example\"",
            );
        }

        if !is_valid_locale(&self.default_locale) {
            diag.error_with_hint(
                Self::FIELDS.default_locale.at_index(index),
                format!("unsupported locale `{}`", self.default_locale),
                "use language_COUNTRY, e.g. \"en_US\" or \"ja_JP\"",
            );
        }

        if self.title_separator.trim().is_empty() {
            diag.warn(
                Self::FIELDS.title_separator.at_index(index),
                "blank separator, titles will read `Page  Site`",
            );
        }
    }
}
