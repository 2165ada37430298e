//! The page tree built from `[[page]]` entries.
//!
//! Pages are addressed by (site, URL path). The tree shape follows the URL:
//! `/blog/post/` hangs under `/blog/`, which hangs under the site home `/`,
//! which hangs under the shared invisible root.

use rustc_hash::FxHashMap;

use super::{Ancestor, Page, depth_of};
use crate::config::PageEntry;
use crate::core::UrlPath;
use crate::site::{RequestContext, SiteError, SiteId, SiteRegistry};

#[derive(Debug, Clone, Default)]
pub struct PageTree {
    pages: Vec<Page>,
    index: FxHashMap<(SiteId, UrlPath), usize>,
}

impl PageTree {
    /// Build pages from config entries, resolving each entry's site.
    ///
    /// Entries without `site` belong to the default site.
    pub fn build(registry: &SiteRegistry, entries: &[PageEntry]) -> Result<Self, SiteError> {
        let mut pages = Vec::with_capacity(entries.len());

        for entry in entries {
            let site = registry.site_for_entry(entry.site.as_deref())?;
            let root_url = registry
                .get(site)
                .ok_or(SiteError::UnknownId(site))?
                .root_url();

            pages.push(Page {
                site,
                full_url: format!("{root_url}{}", entry.url.to_encoded()),
                url: entry.url.clone(),
                title: entry.title.clone(),
                seo_title: entry.seo_title.clone(),
                search_description: entry.search_description.clone(),
                depth: depth_of(&entry.url),
                ancestors: Vec::new(),
                live: entry.live,
                owner: entry.owner.clone(),
                first_published_at: entry.first_published_at,
                last_published_at: entry.last_published_at,
                locale: entry.locale.clone(),
                seo: entry.seo.clone(),
            });
        }

        Ok(Self::from_pages(pages))
    }

    /// Index pages and link each one to its ancestors.
    ///
    /// The first page wins when two share a (site, URL) address.
    pub fn from_pages(mut pages: Vec<Page>) -> Self {
        let mut index = FxHashMap::default();
        for (i, page) in pages.iter().enumerate() {
            index.entry((page.site, page.url.clone())).or_insert(i);
        }

        let chains: Vec<Vec<Ancestor>> = pages
            .iter()
            .map(|page| {
                let mut chain = vec![Ancestor::root()];
                chain.extend(page.url.ancestors().into_iter().filter_map(|url| {
                    let parent = &pages[*index.get(&(page.site, url.clone()))?];
                    Some(Ancestor {
                        title: parent.title.clone(),
                        depth: parent.depth,
                        live: parent.live,
                        url: Some(url),
                    })
                }));
                chain
            })
            .collect();

        for (page, chain) in pages.iter_mut().zip(chains) {
            page.ancestors = chain;
        }

        Self { pages, index }
    }

    pub fn find(&self, site: SiteId, url: &UrlPath) -> Option<&Page> {
        self.index
            .get(&(site, url.clone()))
            .and_then(|&i| self.pages.get(i))
    }

    /// The page addressed by `request`, on the site serving it.
    pub fn find_for_request<'a>(
        &'a self,
        registry: &SiteRegistry,
        request: &RequestContext,
    ) -> Option<&'a Page> {
        let site = registry.find_for_request(request)?;
        self.find(site.id, &request.path())
    }

    /// Pages of one site, in config order.
    pub fn pages_for(&self, site: SiteId) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |page| page.site == site)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
