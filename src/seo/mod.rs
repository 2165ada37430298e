//! SEO output for one request.
//!
//! Two independent read-only pipelines run per rendered page:
//!
//! - [`build_seo_context`] → [`render_head`]: meta tags, Open Graph,
//!   Twitter Card, favicons, verification codes
//! - [`build_schemas`] → [`render_schema`]: the JSON-LD document list
//!
//! plus the per-site text files ([`robots_txt`], [`ads_txt`],
//! [`security_txt`]) and the sitemap.
//!
//! Nothing here fails: missing sites, settings, pages or images only remove
//! the output that depends on them.

mod context;
mod head;
pub mod og;
pub mod resolve;
pub mod schema;
mod sitemap;
mod wellknown;

pub use context::{SeoContext, build_seo_context};
pub use head::render_head;
pub use og::{Dimension, OgImage, resolve_og_image};
pub use schema::{build_schemas, deep_merge, render_schema};
pub use sitemap::Sitemap;
pub use wellknown::{WellKnownError, ads_txt, default_robots_txt, robots_txt, security_txt};

use crate::config::SeoSettings;
use crate::image::Renditions;
use crate::site::{RequestContext, Site, SiteLookup, SiteRegistry};

/// What one render reads besides the page: request, site, settings and
/// the host collaborators.
#[derive(Clone, Copy)]
pub struct SeoEnv<'a> {
    pub request: Option<&'a RequestContext>,
    pub site: Option<&'a Site>,
    pub settings: Option<&'a SeoSettings>,
    pub lookup: &'a dyn SiteLookup,
    pub renditions: &'a dyn Renditions,
}

impl<'a> SeoEnv<'a> {
    /// Environment without a request: no site, no settings.
    pub fn new(lookup: &'a dyn SiteLookup, renditions: &'a dyn Renditions) -> Self {
        Self {
            request: None,
            site: None,
            settings: None,
            lookup,
            renditions,
        }
    }

    /// Environment for `request`, resolving its site and settings.
    pub fn for_request(
        sites: &'a SiteRegistry,
        request: &'a RequestContext,
        renditions: &'a dyn Renditions,
    ) -> Self {
        Self {
            request: Some(request),
            site: sites.find_for_request(request),
            settings: sites.settings_for_request(request),
            lookup: sites,
            renditions,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the SEO tests.

    use crate::config::SeoSettings;
    use crate::image::{Filter, Image, Rendition, RenditionError, Renditions};
    use crate::page::{Page, PageTree, SeoFields};
    use crate::site::{SiteId, SiteRegistry};

    /// Backend that "renders" every image into a predictable URL.
    pub struct FixedRenditions;

    impl Renditions for FixedRenditions {
        fn rendition(&self, image: &Image, filter: Filter) -> Result<Rendition, RenditionError> {
            let (width, height) = filter.dimensions();
            let stem = image.url.rsplit('/').next().unwrap_or_default();
            Ok(Rendition {
                url: format!("/media/renditions/{filter}/{stem}"),
                width,
                height,
            })
        }
    }

    /// `example.com:443` named "Example" with the given settings.
    pub fn registry(settings: Option<SeoSettings>) -> SiteRegistry {
        let mut sites = SiteRegistry::new();
        let id = sites.push("example.com", 443, "Example", true);
        sites.set_settings(id, settings);
        sites
    }

    pub fn settings() -> SeoSettings {
        SeoSettings {
            organization_name: "Example Inc.".into(),
            ..SeoSettings::default()
        }
    }

    /// `/`, `/blog/` and `/blog/post/` on site 0; returns the tree.
    pub fn tree(seo: SeoFields) -> PageTree {
        let site = SiteId(0);
        let mut home = Page::new(site, "/", "Home");
        home.full_url = "https://example.com/".into();
        let mut blog = Page::new(site, "/blog/", "Blog");
        blog.full_url = "https://example.com/blog/".into();
        let mut post = Page::new(site, "/blog/post/", "Post").with_seo(seo);
        post.full_url = "https://example.com/blog/post/".into();
        PageTree::from_pages(vec![home, blog, post])
    }
}
