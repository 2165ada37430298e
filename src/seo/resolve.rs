//! Fallback chains over page and settings fields.

use crate::debug;
use crate::image::Image;
use crate::page::{Page, SeoFields};
use crate::site::{RequestContext, SiteLookup};

/// Locale used when neither the page nor its site sets one.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Title separator used when no settings are configured.
pub const DEFAULT_SEPARATOR: &str = "|";

/// SEO title override, else the page title.
pub fn page_title(page: &Page) -> &str {
    if page.seo_title.is_empty() {
        &page.title
    } else {
        &page.seo_title
    }
}

/// Explicit override, else an absolute URI built from the request, else the
/// precomputed full URL.
///
/// Pages without SEO fields always use their full URL.
pub fn canonical_url(page: &Page, request: Option<&RequestContext>) -> String {
    let Some(seo) = &page.seo else {
        return page.full_url.clone();
    };

    if !seo.canonical_url.is_empty() {
        return seo.canonical_url.clone();
    }

    match request {
        Some(request) => request.absolute_uri(&page.url.to_encoded()),
        None => page.full_url.clone(),
    }
}

/// `noindex`, `nofollow`, both joined with `", "`, or empty.
///
/// Empty means "emit no robots tag at all".
pub fn robots_directive(page: &Page) -> String {
    let Some(seo) = &page.seo else {
        return String::new();
    };

    let mut directives = Vec::with_capacity(2);
    if seo.noindex {
        directives.push("noindex");
    }
    if seo.nofollow {
        directives.push("nofollow");
    }
    directives.join(", ")
}

/// Explicit alt text, else the image title, else empty.
pub fn og_image_alt(seo: &SeoFields) -> String {
    if !seo.og_image_alt.is_empty() {
        return seo.og_image_alt.clone();
    }
    seo.og_image
        .as_ref()
        .map(|image| image.title.clone())
        .unwrap_or_default()
}

/// Page locale, else the default locale of the page's site, else `en_US`.
///
/// Lookup failures fall back silently.
pub fn page_locale(page: &Page, lookup: &dyn SiteLookup) -> String {
    if !page.locale.is_empty() {
        return page.locale.clone();
    }

    match lookup.site_for_page(page) {
        Ok(site) => match lookup.settings_for_site(site) {
            Some(settings) if !settings.default_locale.is_empty() => {
                settings.default_locale.clone()
            }
            _ => DEFAULT_LOCALE.to_string(),
        },
        Err(err) => {
            debug!("locale"; "no site for `{}`: {}", page.url, err);
            DEFAULT_LOCALE.to_string()
        }
    }
}

/// Language code: the locale up to the underscore (`ja_JP` -> `ja`).
pub fn page_lang(page: &Page, lookup: &dyn SiteLookup) -> String {
    lang_of(&page_locale(page, lookup)).to_string()
}

/// Value for `<html lang>`: `ja_JP` -> `ja-JP`.
pub fn html_lang(page: &Page, lookup: &dyn SiteLookup) -> String {
    html_lang_of(&page_locale(page, lookup))
}

pub fn lang_of(locale: &str) -> &str {
    locale.split('_').next().unwrap_or(locale)
}

pub fn html_lang_of(locale: &str) -> String {
    locale.replace('_', "-")
}

/// Make `url` absolute against the request.
///
/// Empty stays empty, absolute http(s) URLs pass through, and without a
/// request the URL is returned as given.
pub fn make_absolute_url(request: Option<&RequestContext>, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    match request {
        Some(request) => request.absolute_uri(url),
        None => url.to_string(),
    }
}

/// Absolute URL of an image's original file, empty without an image.
pub fn image_url(request: Option<&RequestContext>, image: Option<&Image>) -> String {
    image
        .map(|image| make_absolute_url(request, &image.url))
        .unwrap_or_default()
}
