//! Filesystem rendition backend.
//!
//! Originals live under `[media] root` and are addressed by URLs beginning
//! with `[media] url`. Renditions are written once to `renditions_dir` with a
//! content fingerprint in the filename, so an edited original gets a fresh
//! file and an unchanged one is never re-encoded.
//!
//! ```text
//! /media/blog/hero.jpg  --fill-1200x630-->  /media/renditions/hero.fill-1200x630.1a2b3c4d.jpg
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use image::imageops::FilterType;
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use rustc_hash::FxHashMap;

use super::{Filter, Image, Rendition, RenditionError, Renditions};
use crate::config::MediaConfig;
use crate::debug;
use crate::utils::hash;

/// Extensions the encoder writes as-is; anything else is re-encoded as PNG.
const WRITABLE: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

pub struct FsRenditions {
    media_root: PathBuf,
    media_url: String,
    output_dir: PathBuf,
    output_url: String,
    cache: Mutex<FxHashMap<(String, Filter), Rendition>>,
}

impl FsRenditions {
    pub fn new(
        media_root: impl Into<PathBuf>,
        media_url: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        output_url: impl Into<String>,
    ) -> Self {
        Self {
            media_root: media_root.into(),
            media_url: with_trailing_slash(media_url.into()),
            output_dir: output_dir.into(),
            output_url: with_trailing_slash(output_url.into()),
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Backend for a loaded config, resolving directories against `root`.
    pub fn from_config(media: &MediaConfig, root: &Path) -> Self {
        Self::new(
            root.join(&media.root),
            media.url.clone(),
            root.join(&media.renditions_dir),
            media.renditions_url.clone(),
        )
    }

    /// Map an image URL to its original file under the media root.
    pub fn source_path(&self, url: &str) -> Result<PathBuf, RenditionError> {
        let not_media = || RenditionError::NotMedia(url.to_string());

        let path = url.split(['?', '#']).next().unwrap_or(url);
        let relative = path.strip_prefix(&self.media_url).ok_or_else(not_media)?;
        let relative = percent_decode_str(relative)
            .decode_utf8()
            .map_err(|_| not_media())?;

        let relative = Path::new(relative.as_ref());
        if relative.as_os_str().is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(not_media());
        }

        Ok(self.media_root.join(relative))
    }

    fn render(&self, image: &Image, filter: Filter) -> Result<Rendition, RenditionError> {
        let source = self.source_path(&image.url)?;
        let bytes = fs::read(&source).map_err(|e| RenditionError::Io(source.clone(), e))?;

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .filter(|e| WRITABLE.contains(&e.as_str()))
            .unwrap_or_else(|| "png".to_string());
        let name = format!("{stem}.{filter}.{}.{ext}", hash::fingerprint(&bytes));
        let output = self.output_dir.join(&name);

        let (width, height) = filter.dimensions();
        if !output.exists() {
            let decoded = image::load_from_memory(&bytes)
                .map_err(|e| RenditionError::Image(source.clone(), e))?;
            let resized = decoded.resize_to_fill(width, height, FilterType::Lanczos3);

            fs::create_dir_all(&self.output_dir)
                .map_err(|e| RenditionError::Io(self.output_dir.clone(), e))?;
            resized
                .save(&output)
                .map_err(|e| RenditionError::Image(output.clone(), e))?;
            debug!("image"; "rendered {}", name);
        }

        Ok(Rendition {
            url: format!("{}{name}", self.output_url),
            width,
            height,
        })
    }
}

impl Renditions for FsRenditions {
    fn rendition(&self, image: &Image, filter: Filter) -> Result<Rendition, RenditionError> {
        let key = (image.url.clone(), filter);
        if let Some(hit) = self.cache.lock().get(&key) {
            return Ok(hit.clone());
        }

        let rendition = self.render(image, filter)?;
        self.cache.lock().insert(key, rendition.clone());
        Ok(rendition)
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
