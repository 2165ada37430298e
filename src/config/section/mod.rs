//! Configuration section definitions.
//!
//! Each module corresponds to a section in `herald.toml`:
//!
//! | Module     | TOML Section      | Purpose                              |
//! |------------|-------------------|--------------------------------------|
//! | `serve`    | `[serve]`         | Preview server                       |
//! | `media`    | `[media]`         | Original images and renditions       |
//! | `site`     | `[[site]]`        | Hostnames served by this deployment  |
//! | `settings` | `[site.settings]` | Per-site SEO settings                |
//! | `page`     | `[[page]]`        | Page records and their SEO fields    |

mod media;
mod page;
mod serve;
pub mod settings;
mod site;

pub use media::MediaConfig;
pub use page::{PageEntry, SITE_WIDE_TYPES};
pub use serve::ServeConfig;
pub use settings::{OrganizationType, SeoSettings};
pub use site::SiteEntry;
