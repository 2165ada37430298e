//! Sitemap for one site.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! Lists the live, indexable pages of the site serving the request, each
//! at its canonical URL.

use std::borrow::Cow;

use super::SeoEnv;
use super::resolve::canonical_url;
use crate::page::PageTree;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Default)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

#[derive(Debug)]
struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    /// Collect entries for `env.site`; empty without a site.
    pub fn build(env: &SeoEnv<'_>, pages: &PageTree) -> Self {
        let Some(site) = env.site else {
            return Self::default();
        };

        let urls = pages
            .pages_for(site.id)
            .filter(|page| page.live && page.is_indexable())
            .map(|page| UrlEntry {
                loc: canonical_url(page, env.request),
                lastmod: page.last_published_at.map(|date| date.to_date()),
            })
            .collect();

        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 96);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Originals;
    use crate::page::{Page, SeoFields};
    use crate::seo::testing::registry;
    use crate::site::{RequestContext, SiteId, SiteRegistry};
    use crate::utils::date::DateTimeUtc;

    fn pages() -> PageTree {
        let mut home = Page::new(SiteId(0), "/", "Home");
        home.full_url = "https://example.com/".into();
        home.last_published_at = Some(DateTimeUtc::new(2025, 1, 2, 3, 4, 5));
        let mut draft = Page::new(SiteId(0), "/draft/", "Draft");
        draft.live = false;
        let hidden = Page::new(SiteId(0), "/hidden/", "Hidden").with_seo(SeoFields {
            noindex: true,
            ..SeoFields::default()
        });
        let moved = Page::new(SiteId(0), "/moved/", "Moved").with_seo(SeoFields {
            canonical_url: "https://other.example/moved/".into(),
            ..SeoFields::default()
        });
        let other = Page::new(SiteId(1), "/other-site/", "Other");
        PageTree::from_pages(vec![home, draft, hidden, moved, other])
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's <x>"), "it&apos;s &lt;x&gt;");
    }

    #[test]
    fn test_sitemap_lists_live_indexable_pages() {
        let sites = registry(None);
        let request = RequestContext::new("https://example.com/sitemap.xml").unwrap();
        let env = SeoEnv::for_request(&sites, &request, &Originals);

        let sitemap = Sitemap::build(&env, &pages());
        assert_eq!(sitemap.len(), 2);

        let xml = sitemap.into_xml();
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("<loc>https://example.com/</loc>\n    <lastmod>2025-01-02</lastmod>"));
        assert!(!xml.contains("<loc>https://example.com/moved/</loc>"));
        assert!(xml.contains("<loc>https://other.example/moved/</loc>"));
        assert!(!xml.contains("draft"));
        assert!(!xml.contains("hidden"));
        assert!(!xml.contains("other-site"));
        assert_eq!(lines.last().copied(), Some("</urlset>"));
    }

    #[test]
    fn test_sitemap_without_site_is_empty() {
        let sites = SiteRegistry::new();
        let env = SeoEnv::new(&sites, &Originals);
        let sitemap = Sitemap::build(&env, &pages());
        assert!(sitemap.is_empty());
        assert!(!sitemap.into_xml().contains("<url>"));
    }
}
