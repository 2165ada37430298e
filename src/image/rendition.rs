//! The renditions capability.
//!
//! Sized copies of an image are produced by a [`Renditions`] backend. The SEO
//! builders only ever ask for fixed `fill` sizes and treat every failure as
//! "use the original instead", so a backend is free to refuse.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::Image;

/// Resize operation requested from a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Scale to cover `width`x`height`, then crop the overflow.
    Fill { width: u32, height: u32 },
}

impl Filter {
    /// Open Graph preview size.
    pub const OG: Self = Self::Fill {
        width: 1200,
        height: 630,
    };

    /// Smallest logo size accepted for Organization markup.
    pub const LOGO: Self = Self::Fill {
        width: 112,
        height: 112,
    };

    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Fill { width, height } => (width, height),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill { width, height } => write!(f, "fill-{width}x{height}"),
        }
    }
}

/// A generated, sized copy of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error)]
pub enum RenditionError {
    #[error("renditions are disabled")]
    Disabled,

    #[error("image `{0}` is not served from the media root")]
    NotMedia(String),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to process image `{0}`")]
    Image(PathBuf, #[source] image::ImageError),
}

/// Capability to produce sized renditions.
///
/// Callers fall back to the original image on any error.
pub trait Renditions: Send + Sync {
    fn rendition(&self, image: &Image, filter: Filter) -> Result<Rendition, RenditionError>;
}

/// Backend that never renders, so callers always use the original file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Originals;

impl Renditions for Originals {
    fn rendition(&self, _image: &Image, _filter: Filter) -> Result<Rendition, RenditionError> {
        Err(RenditionError::Disabled)
    }
}
