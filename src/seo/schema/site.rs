//! Site-wide schemas: WebSite and Organization.

use serde_json::{Value, json};

use super::schema_base;
use crate::page::JsonMap;
use crate::seo::SeoEnv;
use crate::seo::og::logo_url;

/// `WebSite` for the site serving the request. Needs a request and a named site.
pub fn website(env: &SeoEnv<'_>) -> Option<JsonMap> {
    let request = env.request?;
    let site = env.site?;
    if site.site_name.is_empty() {
        return None;
    }

    let mut schema = schema_base("WebSite");
    schema.insert("name".into(), json!(site.site_name));
    schema.insert("url".into(), json!(request.absolute_uri("/")));
    Some(schema)
}

/// The configured organization. Needs a non-empty `organization_name`.
pub fn organization(env: &SeoEnv<'_>) -> Option<JsonMap> {
    let settings = env.settings?;
    if settings.organization_name.is_empty() {
        return None;
    }

    let mut schema = schema_base(settings.organization_type.as_str());
    schema.insert("name".into(), json!(settings.organization_name));

    if let Some(request) = env.request {
        schema.insert("url".into(), json!(request.absolute_uri("/")));
    }

    if let Some(logo) = &settings.organization_logo {
        let url = logo_url(env, logo);
        if !url.is_empty() {
            schema.insert("logo".into(), json!(url));
        }
    }

    let mut same_as = Vec::with_capacity(2);
    if !settings.twitter_handle.is_empty() {
        same_as.push(Value::String(format!(
            "https://twitter.com/{}",
            settings.twitter_handle
        )));
    }
    if !settings.facebook_url.is_empty() {
        same_as.push(Value::String(settings.facebook_url.clone()));
    }
    if !same_as.is_empty() {
        schema.insert("sameAs".into(), Value::Array(same_as));
    }

    Some(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OrganizationType, SeoSettings};
    use crate::image::{Image, Originals};
    use crate::seo::testing::{FixedRenditions, registry, settings};
    use crate::site::{RequestContext, SiteRegistry};

    fn request() -> RequestContext {
        RequestContext::new("https://example.com/blog/").unwrap()
    }

    #[test]
    fn test_website() {
        let sites = registry(None);
        let request = request();
        let env = SeoEnv::for_request(&sites, &request, &Originals);
        assert_eq!(
            Value::Object(website(&env).unwrap()),
            json!({
                "@context": "https://schema.org",
                "@type": "WebSite",
                "name": "Example",
                "url": "https://example.com/",
            })
        );
    }

    #[test]
    fn test_website_needs_request_and_name() {
        let sites = registry(None);
        assert!(website(&SeoEnv::new(&sites, &Originals)).is_none());

        let mut unnamed = SiteRegistry::new();
        unnamed.push("example.com", 443, "", true);
        let request = request();
        let env = SeoEnv::for_request(&unnamed, &request, &Originals);
        assert!(website(&env).is_none());
    }

    #[test]
    fn test_organization_requires_name() {
        let sites = registry(Some(SeoSettings::default()));
        let request = request();
        let env = SeoEnv::for_request(&sites, &request, &Originals);
        assert!(organization(&env).is_none());

        let sites = registry(Some(settings()));
        let env = SeoEnv::for_request(&sites, &request, &Originals);
        let org = organization(&env).unwrap();
        assert_eq!(org["@type"], "Organization");
        assert_eq!(org["name"], "Example Inc.");
        assert_eq!(org["url"], "https://example.com/");
        assert!(!org.contains_key("sameAs"));
        assert!(!org.contains_key("logo"));
    }

    #[test]
    fn test_organization_same_as_order() {
        let sites = registry(Some(SeoSettings {
            facebook_url: "https://facebook.com/example".into(),
            twitter_handle: "example".into(),
            organization_type: OrganizationType::Corporation,
            ..settings()
        }));
        let request = request();
        let env = SeoEnv::for_request(&sites, &request, &Originals);
        let org = organization(&env).unwrap();

        assert_eq!(org["@type"], "Corporation");
        assert_eq!(
            org["sameAs"],
            json!(["https://twitter.com/example", "https://facebook.com/example"])
        );

        let sites = registry(Some(SeoSettings {
            facebook_url: "https://facebook.com/example".into(),
            ..settings()
        }));
        let env = SeoEnv::for_request(&sites, &request, &Originals);
        assert_eq!(
            organization(&env).unwrap()["sameAs"],
            json!(["https://facebook.com/example"])
        );
    }

    #[test]
    fn test_organization_logo_and_no_request() {
        let org_settings = SeoSettings {
            organization_logo: Some(Image::from_url("/media/logo.png")),
            ..settings()
        };
        let sites = registry(None);
        let mut env = SeoEnv::new(&sites, &FixedRenditions);
        env.settings = Some(&org_settings);

        let org = organization(&env).unwrap();
        assert!(!org.contains_key("url"));
        assert_eq!(org["logo"], "/media/renditions/fill-112x112/logo.png");
    }
}
