//! Preview server.
//!
//! Serves, per site resolved from the `Host` header:
//!
//! | Path                          | Response                              |
//! |-------------------------------|---------------------------------------|
//! | `/robots.txt`                 | configured body or generated default  |
//! | `/ads.txt`                    | configured body, else 404             |
//! | `/.well-known/security.txt`   | configured body, else 404             |
//! | `/sitemap.xml`                | live, indexable pages of the site     |
//! | `[media] renditions_url` …    | rendered images                       |
//! | `[media] url` …               | original media files                  |
//! | any live page URL             | HTML preview with head and JSON-LD    |

mod lifecycle;
mod path;
mod response;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Method, Request, Server};

use super::common::{Project, build_request};
use super::render::preview_page;
use crate::seo::{Sitemap, ads_txt, default_robots_txt, robots_txt, security_txt};
use crate::site::RequestContext;
use crate::{debug, log};

/// Worker threads answering requests.
const WORKERS: usize = 4;

/// What a request resolves to, before anything is written to the socket.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    Text(String),
    Xml(String),
    Html(String),
    File(PathBuf),
    NotFound,
}

/// Bind and serve until Ctrl+C.
pub fn serve(project: Project, interface: Option<IpAddr>, port: Option<u16>) -> Result<()> {
    let interface = interface.unwrap_or(project.config.serve.interface);
    let port = port.unwrap_or(project.config.serve.port);

    let (server, addr) = lifecycle::bind_with_retry(interface, port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    for site in project.sites.iter() {
        debug!("serve"; "site {} ({})", site.root_url(), site.site_name);
    }

    run_request_loop(&server, Arc::new(project), addr)
}

fn run_request_loop(server: &Server, project: Arc<Project>, addr: SocketAddr) -> Result<()> {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKERS)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create thread pool: {e}"))?;

    for request in server.incoming_requests() {
        let project = Arc::clone(&project);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &project, addr) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, project: &Project, addr: SocketAddr) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let host = host_header(&request).unwrap_or_else(|| addr.to_string());
    let route = route(project, &host, request.url());
    debug!("serve"; "{} {} -> {}", request.method(), request.url(), route.label());

    match route {
        Route::Text(body) => response::respond_text(request, body),
        Route::Xml(body) => response::respond_xml(request, body),
        Route::Html(body) => response::respond_html(request, body),
        Route::File(path) => response::respond_file(request, &path),
        Route::NotFound => response::respond_not_found(request),
    }
}

/// Resolve `url` requested with `host` against the project.
fn route(project: &Project, host: &str, url: &str) -> Route {
    let location = url.split(['?', '#']).next().unwrap_or(url);
    let request = RequestContext::from_host_header(host, url).ok().or_else(|| {
        debug!("serve"; "malformed host `{}`, using the default site", host);
        build_request(&project.sites, location, None).ok()
    });
    let Some(request) = request else {
        return match location {
            "/robots.txt" => Route::Text(default_robots_txt(None)),
            _ => Route::NotFound,
        };
    };
    let env = project.env(&request);

    match location {
        "/robots.txt" => return Route::Text(robots_txt(&env)),
        "/ads.txt" => return ads_txt(&env).map_or(Route::NotFound, Route::Text),
        "/.well-known/security.txt" => {
            return security_txt(&env).map_or(Route::NotFound, Route::Text);
        }
        "/sitemap.xml" => return Route::Xml(Sitemap::build(&env, &project.pages).into_xml()),
        _ => {}
    }

    let media = &project.config.media;
    let renditions_dir = project.config.root_join(&media.renditions_dir);
    let media_root = project.config.root_join(&media.root);
    let file = path::resolve_media(url, &media.renditions_url, &renditions_dir)
        .or_else(|| path::resolve_media(url, &media.url, &media_root));
    if let Some(file) = file {
        return Route::File(file);
    }

    match project.page(&request) {
        Some(page) if page.live => Route::Html(preview_page(&env, page)),
        _ => Route::NotFound,
    }
}

impl Route {
    fn label(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Xml(_) => "xml",
            Self::Html(_) => "html",
            Self::File(_) => "file",
            Self::NotFound => "404",
        }
    }
}

/// Value of the `Host` header, if sent.
fn host_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Host"))
        .map(|h| h.value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[[site]]
hostname = "a.example"
port = 80
site_name = "A"
is_default = true

[site.settings]
ads_txt = "a-ads"

[[site]]
hostname = "b.example"
port = 80
site_name = "B"

[site.settings]
robots_txt = "User-agent: *\nDisallow: /"
security_txt = "Contact: mailto:security@b.example"

[[page]]
url = "/"
title = "Home"

[[page]]
url = "/draft/"
title = "Draft"
live = false

[[page]]
site = "b.example"
url = "/"
title = "B home"
"#;

    fn project(root: &std::path::Path) -> Project {
        let mut config = test_parse_config(CONFIG);
        config.root = root.to_path_buf();
        Project::from_config(config).unwrap()
    }

    #[test]
    fn test_text_routes_per_site() {
        let dir = TempDir::new().unwrap();
        let project = project(dir.path());

        assert_eq!(route(&project, "a.example", "/ads.txt"), Route::Text("a-ads".into()));
        assert_eq!(route(&project, "b.example", "/ads.txt"), Route::NotFound);
        assert_eq!(
            route(&project, "b.example", "/.well-known/security.txt"),
            Route::Text("Contact: mailto:security@b.example".into())
        );
        assert_eq!(route(&project, "a.example", "/.well-known/security.txt"), Route::NotFound);
        assert_eq!(
            route(&project, "b.example", "/robots.txt"),
            Route::Text("User-agent: *\nDisallow: /".into())
        );
        assert_eq!(
            route(&project, "a.example", "/robots.txt?x=1"),
            Route::Text("User-agent: *\nAllow: /\n\nSitemap: http://a.example/sitemap.xml".into())
        );
    }

    #[test]
    fn test_unknown_host_uses_default_site() {
        let dir = TempDir::new().unwrap();
        let project = project(dir.path());
        assert_eq!(route(&project, "127.0.0.1:5277", "/ads.txt"), Route::Text("a-ads".into()));
    }

    #[test]
    fn test_malformed_host_still_serves_robots() {
        let dir = TempDir::new().unwrap();
        let project = project(dir.path());

        let Route::Text(robots) = route(&project, "bad host", "/robots.txt") else {
            panic!("robots.txt must always answer");
        };
        assert!(robots.starts_with("User-agent: *\nAllow: /"));
        assert!(robots.ends_with("/sitemap.xml"));
        assert_eq!(route(&project, "bad host", "/ads.txt"), Route::Text("a-ads".into()));
    }

    #[test]
    fn test_sitemap_route() {
        let dir = TempDir::new().unwrap();
        let project = project(dir.path());
        let Route::Xml(xml) = route(&project, "a.example", "/sitemap.xml") else {
            panic!("expected xml");
        };
        assert!(xml.contains("<loc>http://a.example/</loc>"));
        assert!(!xml.contains("draft"));
        assert!(!xml.contains("B home"));
    }

    #[test]
    fn test_page_routes() {
        let dir = TempDir::new().unwrap();
        let project = project(dir.path());

        let Route::Html(html) = route(&project, "b.example", "/") else {
            panic!("expected html");
        };
        assert!(html.contains("<title>B home | B</title>"));

        assert_eq!(route(&project, "a.example", "/draft/"), Route::NotFound);
        assert_eq!(route(&project, "a.example", "/missing/"), Route::NotFound);
    }

    #[test]
    fn test_media_route() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("media")).unwrap();
        fs::write(dir.path().join("media/logo.png"), b"png").unwrap();
        let project = project(dir.path());

        match route(&project, "a.example", "/media/logo.png") {
            Route::File(path) => assert!(path.ends_with("media/logo.png")),
            other => panic!("unexpected route: {other:?}"),
        }
        assert_eq!(route(&project, "a.example", "/media/../herald.toml"), Route::NotFound);
    }
}
