//! Per-site text files: `/robots.txt`, `/ads.txt`, `/.well-known/security.txt`.
//!
//! robots.txt always answers, falling back to a generated default. ads.txt
//! and security.txt have no safe default and report "not found" instead.

use thiserror::Error;

use super::SeoEnv;
use crate::config::SeoSettings;
use crate::site::RequestContext;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WellKnownError {
    #[error("no site matches the request")]
    UnknownSite,

    #[error("{0} is not configured for this site")]
    NotConfigured(&'static str),
}

/// Configured robots.txt body, else the generated default.
pub fn robots_txt(env: &SeoEnv<'_>) -> String {
    match configured(env, |s| s.robots_txt.as_str()) {
        Ok(body) => body.to_string(),
        Err(_) => default_robots_txt(env.request),
    }
}

/// Allow everything and point at the sitemap.
///
/// The sitemap line needs a request to build an absolute URL.
pub fn default_robots_txt(request: Option<&RequestContext>) -> String {
    let mut lines = vec!["User-agent: *".to_string(), "Allow: /".to_string(), String::new()];
    if let Some(request) = request {
        lines.push(format!("Sitemap: {}", request.absolute_uri("/sitemap.xml")));
    }
    lines.join("\n")
}

pub fn ads_txt(env: &SeoEnv<'_>) -> Result<String, WellKnownError> {
    configured(env, |s| s.ads_txt.as_str())
        .map(str::to_string)
        .map_err(|err| err.named("ads.txt"))
}

pub fn security_txt(env: &SeoEnv<'_>) -> Result<String, WellKnownError> {
    configured(env, |s| s.security_txt.as_str())
        .map(str::to_string)
        .map_err(|err| err.named("security.txt"))
}

impl WellKnownError {
    fn named(self, file: &'static str) -> Self {
        match self {
            Self::NotConfigured(_) => Self::NotConfigured(file),
            other => other,
        }
    }
}

/// Non-blank body of one settings field for the request's site.
fn configured<'a>(
    env: &SeoEnv<'a>,
    field: impl Fn(&'a SeoSettings) -> &'a str,
) -> Result<&'a str, WellKnownError> {
    if env.site.is_none() {
        return Err(WellKnownError::UnknownSite);
    }
    let body = env.settings.map(field).unwrap_or_default();
    if body.trim().is_empty() {
        return Err(WellKnownError::NotConfigured(""));
    }
    Ok(body)
}
