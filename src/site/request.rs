//! The inbound request, reduced to what URL building needs.

use url::Url;

use crate::core::UrlPath;

/// Absolute URL of the request being rendered.
///
/// Relative locations are resolved against it, the way a web framework
/// builds absolute URIs from the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    url: Url,
}

impl RequestContext {
    /// Parse an absolute request URL such as `https://example.com/blog/`.
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
        })
    }

    /// Build from an HTTP `Host` header and the request line path.
    pub fn from_host_header(host: &str, path: &str) -> Result<Self, url::ParseError> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self::new(&format!("http://{host}{path}"))
    }

    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(80)
    }

    /// Decoded page path of the request.
    pub fn path(&self) -> UrlPath {
        UrlPath::from_browser(self.url.path())
    }

    /// Absolute URI for `location`.
    ///
    /// Absolute http(s) locations pass through untouched; anything else is
    /// joined onto the request URL.
    pub fn absolute_uri(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            return location.to_string();
        }
        self.url
            .join(location)
            .map(String::from)
            .unwrap_or_else(|_| location.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_and_port() {
        let req = RequestContext::new("https://example.com/blog/").unwrap();
        assert_eq!(req.hostname(), "example.com");
        assert_eq!(req.port(), 443);

        let req = RequestContext::from_host_header("localhost:5277", "/a/?x=1").unwrap();
        assert_eq!(req.hostname(), "localhost");
        assert_eq!(req.port(), 5277);
        assert_eq!(req.path().as_str(), "/a/");
    }

    #[test]
    fn test_absolute_uri() {
        let req = RequestContext::new("https://example.com/blog/post/").unwrap();
        assert_eq!(req.absolute_uri("/"), "https://example.com/");
        assert_eq!(
            req.absolute_uri("/sitemap.xml"),
            "https://example.com/sitemap.xml"
        );
        assert_eq!(
            req.absolute_uri("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_absolute_uri_encodes_path() {
        let req = RequestContext::new("http://example.com/").unwrap();
        assert_eq!(
            req.absolute_uri("/posts/中文/"),
            "http://example.com/posts/%E4%B8%AD%E6%96%87/"
        );
    }
}
