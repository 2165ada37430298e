//! Sites and request-to-site resolution.
//!
//! A deployment can serve several sites from one config. Every page belongs
//! to exactly one site, and each site owns zero or one [`SeoSettings`] record.
//!
//! [`SeoSettings`]: crate::config::SeoSettings

mod registry;
mod request;

pub use registry::{SiteError, SiteLookup, SiteRegistry};
pub use request::RequestContext;

use std::fmt;

/// Index of a site inside its [`SiteRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A hostname served by this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: SiteId,
    pub hostname: String,
    pub port: u16,
    /// Human-readable name, used in titles and WebSite markup. May be empty.
    pub site_name: String,
    /// Fallback for requests whose host matches no site.
    pub is_default: bool,
}

impl Site {
    /// Scheme and authority of the site, without a trailing slash.
    ///
    /// Port 443 means https, port 80 means plain http, anything else is
    /// spelled out.
    pub fn root_url(&self) -> String {
        match self.port {
            80 => format!("http://{}", self.hostname),
            443 => format!("https://{}", self.hostname),
            port => format!("http://{}:{port}", self.hostname),
        }
    }
}
