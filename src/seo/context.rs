//! The flat meta-tag context consumed by the head renderer.

use serde::Serialize;

use super::SeoEnv;
use super::og::{Dimension, resolve_og_image};
use super::resolve::{
    DEFAULT_LOCALE, DEFAULT_SEPARATOR, canonical_url, html_lang_of, image_url, page_locale,
    page_title, robots_directive,
};
use crate::config::SeoSettings;
use crate::image::Image;
use crate::page::Page;

/// Every value the head template reads.
///
/// No field is ever absent: missing inputs leave empty strings and the
/// renderer decides which tags to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoContext {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub robots: String,
    pub og_type: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_image_alt: String,
    pub og_image_width: Dimension,
    pub og_image_height: Dimension,
    pub og_url: String,
    pub og_site_name: String,
    pub og_locale: String,
    pub twitter_card: String,
    pub twitter_site: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
    pub twitter_image_alt: String,
    pub favicon_svg: String,
    pub favicon_png: String,
    pub apple_touch_icon: String,
    pub google_verification: String,
    pub bing_verification: String,
    pub custom_head_html: String,
    pub html_lang: String,
}

/// Build the meta-tag context for `page` (or a page-less response).
pub fn build_seo_context(env: &SeoEnv<'_>, page: Option<&Page>) -> SeoContext {
    let settings = env.settings;

    let title = page.map(page_title).unwrap_or_default().to_string();
    let site_name = env
        .site
        .map(|site| site.site_name.clone())
        .unwrap_or_default();
    let separator = settings
        .map(|s| s.title_separator.as_str())
        .unwrap_or(DEFAULT_SEPARATOR);
    let full_title = if site_name.is_empty() {
        title.clone()
    } else {
        format!("{title} {separator} {site_name}")
    };

    let description = page
        .map(|page| page.search_description.clone())
        .unwrap_or_default();
    let canonical = page
        .map(|page| canonical_url(page, env.request))
        .unwrap_or_default();
    let robots = page.map(robots_directive).unwrap_or_default();
    let og = resolve_og_image(env, page);

    let locale = match page {
        Some(page) => page_locale(page, env.lookup),
        None => settings
            .map(|s| s.default_locale.clone())
            .filter(|locale| !locale.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
    };

    let icon = |image: Option<&Image>| image_url(env.request, image);

    SeoContext {
        title: full_title,
        description: description.clone(),
        canonical_url: canonical.clone(),
        robots,
        og_type: "website".into(),
        og_title: title.clone(),
        og_description: description.clone(),
        og_image: og.url.clone(),
        og_image_alt: og.alt.clone(),
        og_image_width: og.width,
        og_image_height: og.height,
        og_url: canonical,
        og_site_name: site_name,
        html_lang: html_lang_of(&locale),
        og_locale: locale,
        twitter_card: "summary_large_image".into(),
        twitter_site: settings_text(settings, |s| s.twitter_handle.as_str()),
        twitter_title: title,
        twitter_description: description,
        twitter_image: og.url,
        twitter_image_alt: og.alt,
        favicon_svg: icon(settings.and_then(|s| s.favicon_svg.as_ref())),
        favicon_png: icon(settings.and_then(|s| s.favicon_png.as_ref())),
        apple_touch_icon: icon(settings.and_then(|s| s.apple_touch_icon.as_ref())),
        google_verification: settings_text(settings, |s| s.google_site_verification.as_str()),
        bing_verification: settings_text(settings, |s| s.bing_site_verification.as_str()),
        custom_head_html: settings_text(settings, |s| s.custom_head_html.as_str()),
    }
}

/// A settings text field, empty without settings.
fn settings_text(settings: Option<&SeoSettings>, field: impl Fn(&SeoSettings) -> &str) -> String {
    settings.map(|s| field(s).to_string()).unwrap_or_default()
}
