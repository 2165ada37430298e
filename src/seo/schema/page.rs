//! Schemas a page declares in its `schema_data`.

use serde_json::{Value, json};

use super::{deep_merge, schema_base};
use crate::config::SITE_WIDE_TYPES;
use crate::page::{JsonMap, Page};
use crate::seo::SeoEnv;
use crate::seo::og::{logo_url, resolve_og_image};
use crate::seo::resolve::{canonical_url, page_title};

/// How a declared type gets auto-populated before overrides apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Article,
    Product,
    Content,
    Plain,
}

impl Family {
    fn of(ty: &str) -> Self {
        match ty {
            "Article" | "NewsArticle" | "BlogPosting" => Self::Article,
            "Product" => Self::Product,
            "Event" | "Course" | "Recipe" | "HowTo" | "JobPosting" => Self::Content,
            _ => Self::Plain,
        }
    }
}

/// One schema per declared type, in declaration order.
///
/// Site-wide types are skipped; they are emitted separately.
pub fn page_schemas(env: &SeoEnv<'_>, page: &Page) -> Vec<JsonMap> {
    let Some(seo) = &page.seo else {
        return Vec::new();
    };
    let data = &seo.schema_data;

    data.types
        .iter()
        .filter(|ty| !SITE_WIDE_TYPES.contains(&ty.as_str()))
        .map(|ty| {
            let mut schema = schema_for_type(env, page, ty);
            if let Some(overrides) = data.properties_for(ty) {
                deep_merge(&mut schema, overrides);
            }
            schema
        })
        .collect()
}

fn schema_for_type(env: &SeoEnv<'_>, page: &Page, ty: &str) -> JsonMap {
    let mut schema = schema_base(ty);
    schema.insert("name".into(), json!(page_title(page)));
    schema.insert("url".into(), json!(canonical_url(page, env.request)));
    if !page.search_description.is_empty() {
        schema.insert("description".into(), json!(page.search_description));
    }

    match Family::of(ty) {
        Family::Article => add_article_fields(&mut schema, env, page),
        Family::Product => add_image(&mut schema, env, page),
        Family::Content => add_content_fields(&mut schema, env, page, ty),
        Family::Plain => {}
    }

    schema
}

fn add_article_fields(schema: &mut JsonMap, env: &SeoEnv<'_>, page: &Page) {
    schema.insert("headline".into(), json!(page_title(page)));

    if let Some(owner) = &page.owner {
        let name = owner.display_name();
        if !name.is_empty() {
            schema.insert("author".into(), json!({"@type": "Person", "name": name}));
        }
    }

    if let Some(published) = page.first_published_at {
        schema.insert("datePublished".into(), json!(published.to_rfc3339()));
    }
    if let Some(modified) = page.last_published_at {
        schema.insert("dateModified".into(), json!(modified.to_rfc3339()));
    }

    if let Some(settings) = env.settings
        && !settings.organization_name.is_empty()
    {
        let mut publisher = JsonMap::new();
        publisher.insert("@type".into(), json!("Organization"));
        publisher.insert("name".into(), json!(settings.organization_name));
        if let Some(logo) = &settings.organization_logo {
            let url = logo_url(env, logo);
            if !url.is_empty() {
                publisher.insert("logo".into(), json!({"@type": "ImageObject", "url": url}));
            }
        }
        schema.insert("publisher".into(), Value::Object(publisher));
    }

    add_image(schema, env, page);
}

fn add_content_fields(schema: &mut JsonMap, env: &SeoEnv<'_>, page: &Page, ty: &str) {
    add_image(schema, env, page);

    let Some(settings) = env.settings.filter(|s| !s.organization_name.is_empty()) else {
        return;
    };
    let role = match ty {
        "Course" => "provider",
        "Event" => "organizer",
        "JobPosting" => "hiringOrganization",
        _ => return,
    };
    schema
        .entry(role)
        .or_insert_with(|| json!({"@type": "Organization", "name": settings.organization_name}));
}

fn add_image(schema: &mut JsonMap, env: &SeoEnv<'_>, page: &Page) {
    let og = resolve_og_image(env, Some(page));
    if !og.is_empty() {
        schema.insert("image".into(), json!(og.url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeoSettings;
    use crate::image::{Image, Originals};
    use crate::page::{Owner, SchemaData, SeoFields};
    use crate::seo::testing::{FixedRenditions, registry, settings, tree};
    use crate::site::{RequestContext, SiteId, SiteRegistry};
    use crate::utils::date::DateTimeUtc;

    fn post_with(types: &[&str], properties: Value) -> Page {
        let seo = SeoFields {
            schema_data: SchemaData {
                types: types.iter().map(|ty| ty.to_string()).collect(),
                properties: properties.as_object().cloned().unwrap_or_default(),
            },
            ..SeoFields::default()
        };
        let mut post = tree(seo).find(SiteId(0), &"/blog/post/".into()).cloned().unwrap();
        post.search_description = "About the post".into();
        post
    }

    fn with_env<R>(settings: Option<SeoSettings>, f: impl FnOnce(&SeoEnv<'_>) -> R) -> R {
        let sites: SiteRegistry = registry(settings);
        let request = RequestContext::new("https://example.com/blog/post/").unwrap();
        let env = SeoEnv::for_request(&sites, &request, &Originals);
        f(&env)
    }

    #[test]
    fn test_no_seo_fields_no_schemas() {
        let page = Page::new(SiteId(0), "/", "Home");
        with_env(None, |env| assert!(page_schemas(env, &page).is_empty()));
    }

    #[test]
    fn test_site_wide_types_are_skipped() {
        let page = post_with(&["WebSite", "Organization", "BreadcrumbList", "FAQPage"], json!({}));
        let schemas = with_env(None, |env| page_schemas(env, &page));
        assert_eq!(schemas.len(), 1);
        assert_eq!(
            Value::Object(schemas[0].clone()),
            json!({
                "@context": "https://schema.org",
                "@type": "FAQPage",
                "name": "Post",
                "url": "https://example.com/blog/post/",
                "description": "About the post",
            })
        );
    }

    #[test]
    fn test_article_fields() {
        let mut page = post_with(&["BlogPosting"], json!({}));
        page.owner = Some(Owner {
            username: "jdoe".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
        });
        page.first_published_at = Some(DateTimeUtc::new(2024, 1, 15, 10, 30, 0));
        page.last_published_at = Some(DateTimeUtc::new(2024, 2, 1, 8, 0, 0));

        let schemas = with_env(Some(settings()), |env| page_schemas(env, &page));
        let article = &schemas[0];
        assert_eq!(article["headline"], "Post");
        assert_eq!(article["author"], json!({"@type": "Person", "name": "Jane Doe"}));
        assert_eq!(article["datePublished"], "2024-01-15T10:30:00Z");
        assert_eq!(article["dateModified"], "2024-02-01T08:00:00Z");
        assert_eq!(
            article["publisher"],
            json!({"@type": "Organization", "name": "Example Inc."})
        );
        assert!(!article.contains_key("image"));
    }

    #[test]
    fn test_article_without_settings_has_no_publisher() {
        let page = post_with(&["Article"], json!({}));
        let schemas = with_env(None, |env| page_schemas(env, &page));
        assert!(!schemas[0].contains_key("publisher"));
        assert!(!schemas[0].contains_key("author"));
    }

    #[test]
    fn test_publisher_logo_and_image() {
        let org = SeoSettings {
            organization_logo: Some(Image::from_url("/media/logo.png")),
            default_og_image: Some(Image::from_url("/media/default.jpg")),
            ..settings()
        };
        let sites = registry(Some(org));
        let request = RequestContext::new("https://example.com/blog/post/").unwrap();
        let env = SeoEnv::for_request(&sites, &request, &FixedRenditions);
        let page = post_with(&["NewsArticle", "Product"], json!({}));

        let schemas = page_schemas(&env, &page);
        assert_eq!(
            schemas[0]["publisher"]["logo"],
            json!({
                "@type": "ImageObject",
                "url": "https://example.com/media/renditions/fill-112x112/logo.png",
            })
        );
        let image = "https://example.com/media/renditions/fill-1200x630/default.jpg";
        assert_eq!(schemas[0]["image"], image);
        assert_eq!(schemas[1]["image"], image);
        assert!(!schemas[1].contains_key("headline"));
    }

    #[test]
    fn test_content_roles() {
        let page = post_with(
            &["Course", "Event", "JobPosting", "Recipe"],
            json!({"Event": {"organizer": {"@type": "Person", "name": "Ann"}}}),
        );
        let schemas = with_env(Some(settings()), |env| page_schemas(env, &page));
        let org = json!({"@type": "Organization", "name": "Example Inc."});

        assert_eq!(schemas[0]["provider"], org);
        assert_eq!(schemas[1]["organizer"], json!({"@type": "Person", "name": "Ann"}));
        assert_eq!(schemas[2]["hiringOrganization"], org);
        assert!(!schemas[3].contains_key("provider"));
    }

    #[test]
    fn test_overrides_merge_deeply() {
        let page = post_with(
            &["Article"],
            json!({"Article": {
                "headline": "Custom",
                "publisher": {"url": "https://example.com/"},
            }}),
        );
        let schemas = with_env(Some(settings()), |env| page_schemas(env, &page));
        assert_eq!(schemas[0]["headline"], "Custom");
        assert_eq!(
            schemas[0]["publisher"],
            json!({"@type": "Organization", "name": "Example Inc.", "url": "https://example.com/"})
        );
        assert_eq!(schemas[0]["name"], "Post");
    }
}
