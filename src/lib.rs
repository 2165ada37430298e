//! Herald - SEO metadata for multi-site content.
//!
//! Given a request, the page it addresses and the settings of the site
//! serving it, herald builds the `<head>` meta tags (Open Graph, Twitter
//! Card, favicons, verification codes), the JSON-LD structured data, and the
//! per-site `robots.txt`, `ads.txt` and `security.txt` bodies.
//!
//! Sites, settings and pages come from `herald.toml`; see [`config`].

pub mod cli;
pub mod config;
pub mod core;
pub mod image;
pub mod logger;
pub mod page;
pub mod seo;
pub mod site;
pub mod utils;
