//! Meta-tag block for `<head>`.

use std::fmt::Write;

use super::SeoContext;
use crate::utils::html::{escape, escape_attr};
use crate::utils::mime;

/// Render the head block for `ctx`.
///
/// Tags whose value is empty are skipped, except `<title>`, `og:type`,
/// `og:locale` and `twitter:card`. Custom head HTML is appended verbatim.
pub fn render_head(ctx: &SeoContext) -> String {
    let mut head = Head::default();

    head.line(format_args!("<title>{}</title>", escape(&ctx.title)));
    head.meta_name("description", &ctx.description);
    head.link("canonical", &ctx.canonical_url, None);
    head.meta_name("robots", &ctx.robots);

    head.meta_property("og:type", &ctx.og_type);
    head.meta_property("og:title", &ctx.og_title);
    head.meta_property("og:description", &ctx.og_description);
    head.meta_property("og:url", &ctx.og_url);
    head.meta_property("og:site_name", &ctx.og_site_name);
    head.meta_property("og:locale", &ctx.og_locale);
    if !ctx.og_image.is_empty() {
        head.meta_property("og:image", &ctx.og_image);
        head.meta_property("og:image:alt", &ctx.og_image_alt);
        head.meta_property("og:image:width", &ctx.og_image_width.to_attr());
        head.meta_property("og:image:height", &ctx.og_image_height.to_attr());
    }

    head.meta_name("twitter:card", &ctx.twitter_card);
    if !ctx.twitter_site.is_empty() {
        head.meta_name("twitter:site", &format!("@{}", ctx.twitter_site));
    }
    head.meta_name("twitter:title", &ctx.twitter_title);
    head.meta_name("twitter:description", &ctx.twitter_description);
    if !ctx.twitter_image.is_empty() {
        head.meta_name("twitter:image", &ctx.twitter_image);
        head.meta_name("twitter:image:alt", &ctx.twitter_image_alt);
    }

    head.link("icon", &ctx.favicon_svg, Some(mime::types::SVG));
    if !ctx.favicon_png.is_empty() {
        head.link("icon", &ctx.favicon_png, Some(mime::for_icon(&ctx.favicon_png)));
    }
    head.link("apple-touch-icon", &ctx.apple_touch_icon, None);

    head.meta_name("google-site-verification", &ctx.google_verification);
    head.meta_name("msvalidate.01", &ctx.bing_verification);

    if !ctx.custom_head_html.trim().is_empty() {
        head.line(format_args!("{}", ctx.custom_head_html.trim_end()));
    }

    head.out
}

#[derive(Default)]
struct Head {
    out: String,
}

impl Head {
    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        let _ = self.out.write_fmt(args);
    }

    fn meta_name(&mut self, name: &str, content: &str) {
        if !content.is_empty() {
            self.line(format_args!(
                r#"<meta name="{name}" content="{}">"#,
                escape_attr(content)
            ));
        }
    }

    fn meta_property(&mut self, property: &str, content: &str) {
        if !content.is_empty() {
            self.line(format_args!(
                r#"<meta property="{property}" content="{}">"#,
                escape_attr(content)
            ));
        }
    }

    fn link(&mut self, rel: &str, href: &str, mime_type: Option<&str>) {
        if href.is_empty() {
            return;
        }
        match mime_type {
            Some(mime_type) => self.line(format_args!(
                r#"<link rel="{rel}" type="{mime_type}" href="{}">"#,
                escape_attr(href)
            )),
            None => self.line(format_args!(r#"<link rel="{rel}" href="{}">"#, escape_attr(href))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::Dimension;

    fn base() -> SeoContext {
        SeoContext {
            title: "Post | Example".into(),
            og_type: "website".into(),
            og_locale: "en_US".into(),
            twitter_card: "summary_large_image".into(),
            html_lang: "en-US".into(),
            ..SeoContext::default()
        }
    }

    #[test]
    fn test_minimal_head() {
        let head = render_head(&base());
        assert_eq!(
            head,
            "<title>Post | Example</title>\n\
             <meta property=\"og:type\" content=\"website\">\n\
             <meta property=\"og:locale\" content=\"en_US\">\n\
             <meta name=\"twitter:card\" content=\"summary_large_image\">"
        );
    }

    #[test]
    fn test_full_head() {
        let ctx = SeoContext {
            description: "About".into(),
            canonical_url: "https://example.com/post/".into(),
            robots: "noindex, nofollow".into(),
            og_image: "https://example.com/og.jpg".into(),
            og_image_alt: "Alt".into(),
            og_image_width: Dimension::Px(1200),
            og_image_height: Dimension::Unknown,
            twitter_site: "testhandle".into(),
            twitter_image: "https://example.com/og.jpg".into(),
            favicon_svg: "https://example.com/icon.svg".into(),
            favicon_png: "https://example.com/icon.png".into(),
            apple_touch_icon: "https://example.com/touch.png".into(),
            google_verification: "g123".into(),
            bing_verification: "b456".into(),
            custom_head_html: "<meta name=\"x\" content=\"y\">\n".into(),
            ..base()
        };
        let head = render_head(&ctx);

        assert!(head.contains(r#"<meta name="description" content="About">"#));
        assert!(head.contains(r#"<link rel="canonical" href="https://example.com/post/">"#));
        assert!(head.contains(r#"<meta name="robots" content="noindex, nofollow">"#));
        assert!(head.contains(r#"<meta property="og:image:width" content="1200">"#));
        assert!(!head.contains("og:image:height"));
        assert!(head.contains(r#"<meta name="twitter:site" content="@testhandle">"#));
        assert!(!head.contains("twitter:image:alt"));
        assert!(head.contains(r#"<link rel="icon" type="image/svg+xml" href="https://example.com/icon.svg">"#));
        assert!(head.contains(r#"<link rel="icon" type="image/png" href="https://example.com/icon.png">"#));
        assert!(head.contains(r#"<link rel="apple-touch-icon" href="https://example.com/touch.png">"#));
        assert!(head.contains(r#"<meta name="google-site-verification" content="g123">"#));
        assert!(head.contains(r#"<meta name="msvalidate.01" content="b456">"#));
        assert!(head.ends_with(r#"<meta name="x" content="y">"#));
    }

    #[test]
    fn test_values_are_escaped() {
        let ctx = SeoContext {
            title: "Fish & <Chips>".into(),
            description: r#"Say "hi""#.into(),
            ..base()
        };
        let head = render_head(&ctx);
        assert!(head.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
        assert!(head.contains(r#"content="Say &quot;hi&quot;""#));
    }
}
