//! URL path type for page addresses.
//!
//! - Internal representation: Always decoded (human-readable)
//! - Browser boundary: Decode on input, encode on output

use std::borrow::Borrow;
use std::sync::{Arc, OnceLock};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters escaped inside a path segment (RFC 3986 unreserved stay as-is).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Decoded page URL path
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts and ends with `/`
/// - Never carries a query string or fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from a request line path (decode percent-encoding, strip query string).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;
        let path = encoded.split('?').next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_page(&decoded)
    }

    /// Create page URL (with trailing slash). Normalizes leading/trailing slashes.
    /// Strips query string and fragment.
    pub fn from_page(decoded: &str) -> Self {
        let trimmed = decoded.trim();

        if trimmed.is_empty() || trimmed == "/" {
            return Self::root();
        }

        let path = Self::strip_query_fragment(trimmed);

        let with_leading = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        let normalized = if with_leading.ends_with('/') {
            with_leading
        } else {
            format!("{with_leading}/")
        };

        Self(Arc::from(normalized))
    }

    /// The site home path `/`.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Strip query string and fragment from a path using url crate.
    fn strip_query_fragment(path: &str) -> String {
        use percent_encoding::percent_decode_str;

        static BASE: OnceLock<Option<url::Url>> = OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").ok());

        match base.as_ref().and_then(|base| base.join(path).ok()) {
            Some(parsed) => percent_decode_str(parsed.path())
                .decode_utf8()
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| parsed.path().to_string()),
            None => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        use percent_encoding::utf8_percent_encode;
        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Check if this is the site home (`/`).
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }

    /// Non-empty path segments, `/blog/post/` -> `["blog", "post"]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Get parent URL path.
    ///
    /// `/posts/hello/` -> `/posts/`, `/posts/` -> `/`, `/` -> `None`
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.0.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.rfind('/') {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(Arc::from(format!("{}/", &trimmed[..idx])))),
        }
    }

    /// All proper prefixes from the home page down, `/a/b/c/` -> `/`, `/a/`, `/a/b/`.
    pub fn ancestors(&self) -> Vec<Self> {
        let mut chain = Vec::new();
        let mut current = self.parent();
        while let Some(path) = current {
            current = path.parent();
            chain.push(path);
        }
        chain.reverse();
        chain
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_page(s)
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_page(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_decodes() {
        assert_eq!(
            UrlPath::from_browser("/posts/%E4%B8%AD%E6%96%87/").as_str(),
            "/posts/中文/"
        );
        assert_eq!(
            UrlPath::from_browser("/posts/hello%20world?x=1").as_str(),
            "/posts/hello world/"
        );
    }

    #[test]
    fn test_from_browser_invalid_utf8() {
        let url = UrlPath::from_browser("/posts/%FF/");
        assert_eq!(url.as_str(), "/posts/%FF/");
    }

    #[test]
    fn test_from_page_normalizes_slashes() {
        assert_eq!(UrlPath::from_page("posts/hello").as_str(), "/posts/hello/");
        assert_eq!(UrlPath::from_page("").as_str(), "/");
        assert!(UrlPath::from_page(" / ").is_root());
    }

    #[test]
    fn test_from_page_strips_query_and_fragment() {
        assert_eq!(
            UrlPath::from_page("/posts/hello?v=1#section").as_str(),
            "/posts/hello/"
        );
        assert_eq!(UrlPath::from_page("/posts/中文?v=1").as_str(), "/posts/中文/");
    }

    #[test]
    fn test_to_encoded() {
        let url = UrlPath::from_page("/posts/中文 x/");
        assert_eq!(url.to_encoded(), "/posts/%E4%B8%AD%E6%96%87%20x/");
        assert_eq!(
            UrlPath::from_page("/blog/hello-world_v1.2/").to_encoded(),
            "/blog/hello-world_v1.2/"
        );
    }

    #[test]
    fn test_segments() {
        let url = UrlPath::from_page("/blog/2024/post/");
        assert_eq!(url.segments().collect::<Vec<_>>(), ["blog", "2024", "post"]);
        assert_eq!(UrlPath::root().segments().count(), 0);
    }

    #[test]
    fn test_parent() {
        assert_eq!(
            UrlPath::from_page("/posts/hello/").parent(),
            Some(UrlPath::from_page("/posts/"))
        );
        assert_eq!(UrlPath::from_page("/posts/").parent(), Some(UrlPath::root()));
        assert_eq!(UrlPath::root().parent(), None);
    }

    #[test]
    fn test_ancestors_from_home_down() {
        let chain = UrlPath::from_page("/a/b/c/").ancestors();
        let chain: Vec<_> = chain.iter().map(UrlPath::as_str).collect();
        assert_eq!(chain, ["/", "/a/", "/a/b/"]);
        assert!(UrlPath::root().ancestors().is_empty());
    }

    #[test]
    fn test_serialize_deserialize() {
        let url = UrlPath::from_page("/posts/中文/");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""/posts/中文/""#);

        let parsed: UrlPath = serde_json::from_str(r#""posts/中文""#).unwrap();
        assert_eq!(parsed, url);
    }
}
