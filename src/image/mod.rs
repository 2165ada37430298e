//! Images and their sized renditions.
//!
//! # Modules
//!
//! - [`rendition`]: The `Renditions` capability, filters and errors
//! - [`fs`]: Filesystem rendition backend built on the `image` crate

pub mod fs;
pub mod rendition;

pub use fs::FsRenditions;
pub use rendition::{Filter, Originals, Rendition, RenditionError, Renditions};

use serde::{Deserialize, Deserializer, Serialize};

/// An image known to the site: its original URL plus whatever metadata the
/// config provides.
///
/// In `herald.toml` an image is either a bare URL string or an inline table:
///
/// ```toml
/// og_image = "/media/hero.jpg"
/// og_image = { url = "/media/hero.jpg", title = "Harbour at dawn", width = 2400, height = 1600 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// URL of the original file, relative or absolute.
    pub url: String,
    /// Human title, used as alt-text fallback. Defaults to the file stem.
    pub title: String,
    /// Native width in pixels, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Native height in pixels, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Image {
    /// Image with unknown dimensions, titled after its file stem.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let title = file_stem(&url).to_string();
        Self {
            url,
            title,
            width: None,
            height: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// `/media/hero.final.jpg?v=2` -> `hero.final`
fn file_stem(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

impl<'de> Deserialize<'de> for Image {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Url(String),
            Table {
                url: String,
                title: Option<String>,
                width: Option<u32>,
                height: Option<u32>,
            },
        }

        let image = match Raw::deserialize(deserializer)? {
            Raw::Url(url) => Self::from_url(url),
            Raw::Table {
                url,
                title,
                width,
                height,
            } => {
                let mut image = Self::from_url(url);
                if let Some(title) = title {
                    image.title = title;
                }
                image.width = width;
                image.height = height;
                image
            }
        };

        if image.url.trim().is_empty() {
            return Err(serde::de::Error::custom("image url must not be empty"));
        }
        Ok(image)
    }
}
