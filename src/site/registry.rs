//! Site registry: request resolution and per-site settings.

use thiserror::Error;

use super::{RequestContext, Site, SiteId};
use crate::config::{SeoSettings, SiteEntry};
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("no site with id {0}")]
    UnknownId(SiteId),

    #[error("no site matches `{0}`")]
    UnknownName(String),

    #[error("`{0}` matches several sites, add the port (`host:port`)")]
    Ambiguous(String),

    #[error("no default site configured")]
    NoDefault,
}

/// Capability to find the site (and its settings) a page belongs to.
///
/// Lookups may fail; callers that only need a fallback value treat any
/// error as "not configured".
pub trait SiteLookup {
    fn site_for_page(&self, page: &Page) -> Result<&Site, SiteError>;
    fn settings_for_site(&self, site: &Site) -> Option<&SeoSettings>;
}

/// All configured sites, each with zero or one settings record.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    settings: Vec<Option<SeoSettings>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[SiteEntry]) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            let id = registry.push(
                entry.hostname.clone(),
                entry.port,
                entry.site_name.clone(),
                entry.is_default,
            );
            registry.set_settings(id, entry.settings.clone());
        }
        registry
    }

    /// Register a site without settings.
    pub fn push(
        &mut self,
        hostname: impl Into<String>,
        port: u16,
        site_name: impl Into<String>,
        is_default: bool,
    ) -> SiteId {
        let id = SiteId(self.sites.len());
        self.sites.push(Site {
            id,
            hostname: hostname.into(),
            port,
            site_name: site_name.into(),
            is_default,
        });
        self.settings.push(None);
        id
    }

    pub fn set_settings(&mut self, id: SiteId, settings: Option<SeoSettings>) {
        if let Some(slot) = self.settings.get_mut(id.0) {
            *slot = settings;
        }
    }

    pub fn get(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The site flagged `is_default`, or the only site when there is one.
    pub fn default_site(&self) -> Option<&Site> {
        self.sites
            .iter()
            .find(|s| s.is_default)
            .or(match self.sites.as_slice() {
                [only] => Some(only),
                _ => None,
            })
    }

    /// Resolve the site serving `request`.
    ///
    /// Order: exact hostname and port, then a hostname shared by no other
    /// site, then the default site.
    pub fn find_for_request(&self, request: &RequestContext) -> Option<&Site> {
        let host = request.hostname();
        let port = request.port();

        let same_host = |s: &&Site| s.hostname.eq_ignore_ascii_case(host);

        if let Some(site) = self.sites.iter().filter(same_host).find(|s| s.port == port) {
            return Some(site);
        }

        let mut by_host = self.sites.iter().filter(same_host);
        if let (Some(site), None) = (by_host.next(), by_host.next()) {
            return Some(site);
        }

        self.default_site()
    }

    /// Resolve a `host` or `host:port` reference from the config.
    pub fn resolve_name(&self, name: &str) -> Result<SiteId, SiteError> {
        let (host, port) = match name.rsplit_once(':') {
            Some((host, port)) => match port.parse::<u16>() {
                Ok(port) => (host, Some(port)),
                Err(_) => return Err(SiteError::UnknownName(name.to_string())),
            },
            None => (name, None),
        };

        let mut matches = self
            .sites
            .iter()
            .filter(|s| s.hostname.eq_ignore_ascii_case(host))
            .filter(|s| port.is_none_or(|p| s.port == p));

        match (matches.next(), matches.next()) {
            (Some(site), None) => Ok(site.id),
            (Some(_), Some(_)) => Err(SiteError::Ambiguous(name.to_string())),
            (None, _) => Err(SiteError::UnknownName(name.to_string())),
        }
    }

    /// Site a `[[page]]` entry belongs to: the named one, else the default.
    pub fn site_for_entry(&self, name: Option<&str>) -> Result<SiteId, SiteError> {
        match name {
            Some(name) => self.resolve_name(name),
            None => self
                .default_site()
                .map(|site| site.id)
                .ok_or(SiteError::NoDefault),
        }
    }

    /// Settings for the site resolved from `request`, none when unconfigured.
    pub fn settings_for_request(&self, request: &RequestContext) -> Option<&SeoSettings> {
        self.find_for_request(request)
            .and_then(|site| self.settings_for_site(site))
    }
}

impl SiteLookup for SiteRegistry {
    fn site_for_page(&self, page: &Page) -> Result<&Site, SiteError> {
        self.get(page.site).ok_or(SiteError::UnknownId(page.site))
    }

    fn settings_for_site(&self, site: &Site) -> Option<&SeoSettings> {
        self.settings.get(site.id.0).and_then(Option::as_ref)
    }
}
