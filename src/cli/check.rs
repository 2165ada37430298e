//! `herald check`: validate the config and summarize each site.

use std::path::Path;

use anyhow::{Result, bail};

use super::common::Project;
use crate::config::{ConfigDiagnostics, HeraldConfig, SeoSettings};
use crate::logger::{Status, status};
use crate::page::Page;
use crate::site::{Site, SiteLookup};

/// Print one status line per diagnostic and per site.
///
/// Fails when the config has errors.
pub fn check_config(config_name: &Path) -> Result<()> {
    let config = HeraldConfig::read(config_name)?;
    status(
        Status::Ok,
        &format!("parsed {}", config.config_path.display()),
        "",
    );

    let diag = config.diagnose();
    report_diagnostics(&diag);
    if diag.has_errors() {
        bail!(
            "{} error{} in config",
            diag.len(),
            if diag.len() == 1 { "" } else { "s" }
        );
    }

    let project = Project::from_config(config)?;
    for site in project.sites.iter() {
        let pages = project.pages.pages_for(site.id).count();
        status(
            Status::Ok,
            &format!("site {} ({} page{})", site_label(site), pages, if pages == 1 { "" } else { "s" }),
            "",
        );
        for (url, schema_data) in declared_schemas(project.pages.pages_for(site.id)) {
            status(Status::Ok, &format!("  {url}: JSON-LD"), &schema_data);
        }
        match project.sites.settings_for_site(site) {
            Some(settings) => report_settings(settings),
            None => status(
                Status::Warn,
                "no [site.settings]",
                "robots.txt uses the default, ads.txt and security.txt return 404",
            ),
        }
    }

    Ok(())
}

fn report_diagnostics(diag: &ConfigDiagnostics) {
    for error in diag.errors() {
        let detail = error.hint.as_deref().unwrap_or_default();
        status(
            Status::Fail,
            &format!("{}: {}", error.field.as_str(), error.message),
            detail,
        );
    }
    for warning in diag.warnings() {
        status(
            Status::Warn,
            &format!("{}: {}", warning.field.as_str(), warning.message),
            "",
        );
    }
    for field in diag.hints() {
        status(Status::Warn, &format!("{} is experimental", field.as_str()), "");
    }
}

fn report_settings(settings: &SeoSettings) {
    let organization = if settings.organization_name.is_empty() {
        (Status::Warn, "no organization_name, Organization schema is omitted".to_string())
    } else {
        (
            Status::Ok,
            format!(
                "{} `{}`",
                settings.organization_type, settings.organization_name
            ),
        )
    };
    status(organization.0, &format!("  {}", organization.1), "");

    let files = [
        ("robots.txt", &settings.robots_txt, "generated default"),
        ("ads.txt", &settings.ads_txt, "404"),
        ("security.txt", &settings.security_txt, "404"),
    ];
    for (name, body, fallback) in files {
        if body.trim().is_empty() {
            status(Status::Warn, &format!("  {name}: {fallback}"), "");
        } else {
            let lines = body.lines().count();
            status(Status::Ok, &format!("  {name}: {lines} line(s)"), "");
        }
    }
}

/// `(url, stored schema_data JSON)` for pages declaring JSON-LD types or overrides.
fn declared_schemas<'a>(pages: impl Iterator<Item = &'a Page>) -> Vec<(String, String)> {
    pages
        .filter_map(|page| {
            let seo = page.seo.as_ref()?;
            (!seo.schema_data.is_empty())
                .then(|| (page.url.to_string(), seo.schema_data.to_json()))
        })
        .collect()
}

fn site_label(site: &Site) -> String {
    let name = if site.site_name.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", site.site_name)
    };
    let default = if site.is_default { ", default" } else { "" };
    format!("{}{name}{default}", site.root_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{SchemaData, SeoFields};
    use crate::site::SiteId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_label() {
        let site = Site {
            id: SiteId(0),
            hostname: "example.com".into(),
            port: 443,
            site_name: "Example".into(),
            is_default: true,
        };
        assert_eq!(site_label(&site), "https://example.com \"Example\", default");
    }

    #[test]
    fn test_declared_schemas() {
        let mut event = Page::new(SiteId(0), "/event/", "Event").with_seo(SeoFields::default());
        if let Some(seo) = event.seo.as_mut() {
            seo.schema_data = SchemaData::from_json(r#"{"types": ["Event"]}"#);
        }
        let pages = [
            Page::new(SiteId(0), "/", "Home"),
            Page::new(SiteId(0), "/about/", "About").with_seo(SeoFields::default()),
            event,
        ];

        let declared = declared_schemas(pages.iter());
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].0, "/event/");
        assert_eq!(declared[0].1, r#"{"types":["Event"],"properties":{}}"#);
    }

    #[test]
    fn test_check_passes_and_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("herald.toml");

        fs::write(&path, "[[site]]\nhostname = \"example.com\"\n[site.settings]\nads_txt = \"x\"\n").unwrap();
        assert!(check_config(&path).is_ok());

        fs::write(&path, "[[site]]\nhostname = \"\"\n").unwrap();
        let err = check_config(&path).unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }
}
