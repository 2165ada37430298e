//! Open Graph image selection.
//!
//! Priority: the page's own image, else the site default, else nothing.
//! A selected image is rendered at 1200x630; when the backend fails the
//! original file is used with whatever native size is known.

use serde::{Serialize, Serializer};

use super::SeoEnv;
use super::resolve::{image_url, make_absolute_url, og_image_alt};
use crate::debug;
use crate::image::{Filter, Image};
use crate::page::Page;

/// A pixel size that may be unknown.
///
/// Serializes as a number, or as `""` when unknown, so templates can treat
/// every context value as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dimension {
    #[default]
    Unknown,
    Px(u32),
}

impl Dimension {
    pub fn to_attr(self) -> String {
        match self {
            Self::Unknown => String::new(),
            Self::Px(px) => px.to_string(),
        }
    }
}

impl From<Option<u32>> for Dimension {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Unknown, Self::Px)
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unknown => serializer.serialize_str(""),
            Self::Px(px) => serializer.serialize_u32(*px),
        }
    }
}

/// The resolved Open Graph image. All fields empty when none resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub alt: String,
    pub width: Dimension,
    pub height: Dimension,
}

impl OgImage {
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Pick and render the Open Graph image for `page`.
pub fn resolve_og_image(env: &SeoEnv<'_>, page: Option<&Page>) -> OgImage {
    let from_page = page
        .and_then(|page| page.seo.as_ref())
        .and_then(|seo| seo.og_image.as_ref().map(|image| (image, og_image_alt(seo))));

    let from_settings = || {
        env.settings.and_then(|settings| {
            settings
                .default_og_image
                .as_ref()
                .map(|image| (image, settings.default_og_image_alt.clone()))
        })
    };

    let Some((image, alt)) = from_page.or_else(from_settings) else {
        return OgImage::default();
    };

    match env.renditions.rendition(image, Filter::OG) {
        Ok(rendition) => OgImage {
            url: make_absolute_url(env.request, &rendition.url),
            alt,
            width: Dimension::Px(rendition.width),
            height: Dimension::Px(rendition.height),
        },
        Err(err) => {
            debug!("og"; "{} of `{}` unavailable: {}", Filter::OG, image.url, err);
            OgImage {
                url: image_url(env.request, Some(image)),
                alt,
                width: image.width.into(),
                height: image.height.into(),
            }
        }
    }
}

/// Absolute logo URL at 112x112, falling back to the original file.
pub fn logo_url(env: &SeoEnv<'_>, logo: &Image) -> String {
    match env.renditions.rendition(logo, Filter::LOGO) {
        Ok(rendition) => make_absolute_url(env.request, &rendition.url),
        Err(err) => {
            debug!("og"; "{} of `{}` unavailable: {}", Filter::LOGO, logo.url, err);
            image_url(env.request, Some(logo))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeoSettings;
    use crate::image::Originals;
    use crate::page::SeoFields;
    use crate::seo::testing::{FixedRenditions, registry};
    use crate::site::{RequestContext, SiteId};

    fn settings_with_default() -> SeoSettings {
        SeoSettings {
            default_og_image: Some(Image::from_url("/media/default.png").with_size(800, 600)),
            default_og_image_alt: "Default alt".into(),
            ..SeoSettings::default()
        }
    }

    fn page_with_image() -> Page {
        Page::new(SiteId(0), "/a/", "A").with_seo(SeoFields {
            og_image: Some(Image::from_url("/media/hero.jpg").with_title("Hero")),
            ..SeoFields::default()
        })
    }

    #[test]
    fn test_no_image_is_all_empty() {
        let sites = registry(None);
        let env = SeoEnv::new(&sites, &Originals);
        let og = resolve_og_image(&env, None);
        assert!(og.is_empty());
        assert_eq!(og, OgImage::default());

        let json = serde_json::to_value(&og).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "", "alt": "", "width": "", "height": ""})
        );
    }

    #[test]
    fn test_page_image_rendition() {
        let sites = registry(None);
        let request = RequestContext::new("https://example.com/a/").unwrap();
        let env = SeoEnv::for_request(&sites, &request, &FixedRenditions);

        let og = resolve_og_image(&env, Some(&page_with_image()));
        assert_eq!(
            og.url,
            "https://example.com/media/renditions/fill-1200x630/hero.jpg"
        );
        assert_eq!(og.alt, "Hero");
        assert_eq!(og.width, Dimension::Px(1200));
        assert_eq!(og.height, Dimension::Px(630));
    }

    #[test]
    fn test_page_image_wins_over_default() {
        let settings = settings_with_default();
        let sites = registry(Some(settings.clone()));
        let mut env = SeoEnv::new(&sites, &Originals);
        env.settings = Some(&settings);

        let og = resolve_og_image(&env, Some(&page_with_image()));
        assert_eq!(og.url, "/media/hero.jpg");
        assert_eq!(og.alt, "Hero");
    }

    #[test]
    fn test_default_image_falls_back_to_original() {
        let settings = settings_with_default();
        let sites = registry(Some(settings));
        let request = RequestContext::new("https://example.com/").unwrap();
        let env = SeoEnv::for_request(&sites, &request, &Originals);

        let page = Page::new(SiteId(0), "/", "Home");
        let og = resolve_og_image(&env, Some(&page));
        assert_eq!(og.url, "https://example.com/media/default.png");
        assert_eq!(og.alt, "Default alt");
        assert_eq!(og.width, Dimension::Px(800));
        assert_eq!(og.height, Dimension::Px(600));
    }

    #[test]
    fn test_unknown_size_serializes_empty() {
        let og = OgImage {
            url: "/media/a.png".into(),
            alt: String::new(),
            width: None.into(),
            height: Some(10).into(),
        };
        let json = serde_json::to_value(&og).unwrap();
        assert_eq!(json["width"], "");
        assert_eq!(json["height"], 10);
        assert_eq!(og.width.to_attr(), "");
    }

    #[test]
    fn test_logo_url() {
        let sites = registry(None);
        let logo = Image::from_url("/media/logo.png");

        let env = SeoEnv::new(&sites, &FixedRenditions);
        assert_eq!(
            logo_url(&env, &logo),
            "/media/renditions/fill-112x112/logo.png"
        );

        let env = SeoEnv::new(&sites, &Originals);
        assert_eq!(logo_url(&env, &logo), "/media/logo.png");
    }
}
