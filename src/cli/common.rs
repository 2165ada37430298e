//! Common utilities shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result, bail};

use super::TargetArgs;
use crate::config::HeraldConfig;
use crate::image::Renditions;
use crate::page::{Page, PageTree};
use crate::seo::SeoEnv;
use crate::site::{RequestContext, SiteRegistry};

/// A loaded config with its sites, pages and rendition backend.
pub struct Project {
    pub config: HeraldConfig,
    pub sites: SiteRegistry,
    pub pages: PageTree,
    pub renditions: Box<dyn Renditions>,
}

impl Project {
    /// Load and validate `config_name`, then build the collaborators.
    pub fn load(config_name: &Path) -> Result<Self> {
        Self::from_config(HeraldConfig::load(config_name)?)
    }

    pub fn from_config(config: HeraldConfig) -> Result<Self> {
        let sites = config.sites();
        let pages = config.pages(&sites).context("failed to build page tree")?;
        let renditions = config.renditions();
        Ok(Self {
            config,
            sites,
            pages,
            renditions,
        })
    }

    /// Request for a CLI target.
    pub fn request(&self, target: &TargetArgs) -> Result<RequestContext> {
        build_request(&self.sites, &target.url, target.host.as_deref())
    }

    pub fn env<'a>(&'a self, request: &'a RequestContext) -> SeoEnv<'a> {
        SeoEnv::for_request(&self.sites, request, self.renditions.as_ref())
    }

    /// The configured page addressed by `request`, if any.
    pub fn page(&self, request: &RequestContext) -> Option<&Page> {
        self.pages.find_for_request(&self.sites, request)
    }
}

/// Turn a CLI URL into a request.
///
/// - absolute `http(s)://` URLs are used as given
/// - with `host`, the URL is a path sent with that `Host` header
/// - otherwise the path is taken relative to the default site
pub fn build_request(sites: &SiteRegistry, url: &str, host: Option<&str>) -> Result<RequestContext> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return RequestContext::new(url).with_context(|| format!("invalid URL `{url}`"));
    }

    if let Some(host) = host {
        return RequestContext::from_host_header(host, url)
            .with_context(|| format!("invalid host `{host}` or path `{url}`"));
    }

    let Some(site) = sites.default_site() else {
        bail!("no default site to resolve `{url}` against, pass an absolute URL or --host");
    };
    let path = if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{url}")
    };
    RequestContext::new(&format!("{}{path}", site.root_url()))
        .with_context(|| format!("invalid path `{url}`"))
}
