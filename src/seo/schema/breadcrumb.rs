//! BreadcrumbList from the page's ancestor chain.

use serde_json::{Value, json};

use super::schema_base;
use crate::page::{JsonMap, Page, ROOT_DEPTH};
use crate::seo::SeoEnv;
use crate::seo::resolve::make_absolute_url;

/// Breadcrumbs for `page`, or `None` when fewer than two entries remain.
///
/// The tree root is never listed and unpublished ancestors are skipped.
/// Positions count only listed entries. The current page comes last and
/// carries no `item` link.
pub fn breadcrumb(env: &SeoEnv<'_>, page: &Page) -> Option<JsonMap> {
    let mut ancestors = page
        .ancestors
        .iter()
        .filter(|ancestor| ancestor.depth > ROOT_DEPTH)
        .peekable();
    if ancestors.peek().is_none() && page.depth <= ROOT_DEPTH + 1 {
        return None;
    }

    let mut items = Vec::new();
    for ancestor in ancestors.filter(|ancestor| ancestor.live) {
        let mut item = list_item(items.len() + 1, &ancestor.title);
        if let Some(url) = &ancestor.url {
            item.insert(
                "item".into(),
                json!(make_absolute_url(env.request, &url.to_encoded())),
            );
        }
        items.push(Value::Object(item));
    }
    items.push(Value::Object(list_item(items.len() + 1, &page.title)));

    if items.len() < 2 {
        return None;
    }

    let mut schema = schema_base("BreadcrumbList");
    schema.insert("itemListElement".into(), Value::Array(items));
    Some(schema)
}

fn list_item(position: usize, name: &str) -> JsonMap {
    let mut item = JsonMap::new();
    item.insert("@type".into(), json!("ListItem"));
    item.insert("position".into(), json!(position));
    item.insert("name".into(), json!(name));
    item
}
