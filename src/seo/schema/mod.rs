//! JSON-LD assembly.
//!
//! Output order is fixed: WebSite, Organization, BreadcrumbList, then the
//! page-declared types. Every entry that lacks its inputs is left out.

mod breadcrumb;
mod merge;
mod page;
mod site;

pub use merge::deep_merge;

use serde_json::json;

use super::SeoEnv;
use crate::page::{JsonMap, Page};
use crate::utils::html::escape_script_json;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Every schema for the current request and page.
pub fn build_schemas(env: &SeoEnv<'_>, page: Option<&Page>) -> Vec<JsonMap> {
    let mut schemas = Vec::new();
    schemas.extend(site::website(env));
    schemas.extend(site::organization(env));
    if let Some(page) = page {
        schemas.extend(breadcrumb::breadcrumb(env, page));
        schemas.extend(page::page_schemas(env, page));
    }
    schemas
}

/// The `<script type="application/ld+json">` block, empty without schemas.
pub fn render_schema(schemas: &[JsonMap]) -> String {
    if schemas.is_empty() {
        return String::new();
    }
    let json = serde_json::to_string_pretty(schemas).unwrap_or_else(|_| "[]".to_string());
    format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        escape_script_json(&json)
    )
}

/// A mapping holding only `@context` and `@type`.
fn schema_base(ty: &str) -> JsonMap {
    let mut schema = JsonMap::new();
    schema.insert("@context".into(), json!(SCHEMA_CONTEXT));
    schema.insert("@type".into(), json!(ty));
    schema
}
