//! Render commands: `head`, `schema`, `context`, `text`, and preview pages.

use anyhow::Result;

use super::common::Project;
use super::{TargetArgs, TextKind};
use crate::page::Page;
use crate::seo::{
    SeoEnv, WellKnownError, ads_txt, build_schemas, build_seo_context, render_head,
    render_schema, robots_txt, security_txt,
};
use crate::site::RequestContext;
use crate::utils::html::escape;
use crate::{debug, log};

/// Print the meta-tag block.
pub fn head(project: &Project, target: &TargetArgs) -> Result<()> {
    let request = project.request(target)?;
    let page = lookup_page(project, &request);
    let ctx = build_seo_context(&project.env(&request), page);
    println!("{}", render_head(&ctx));
    Ok(())
}

/// Print the JSON-LD block, or nothing when no schema applies.
pub fn schema(project: &Project, target: &TargetArgs) -> Result<()> {
    let request = project.request(target)?;
    let page = lookup_page(project, &request);
    let html = render_schema(&build_schemas(&project.env(&request), page));
    if !html.is_empty() {
        println!("{html}");
    }
    Ok(())
}

/// Print the meta-tag context as pretty JSON.
pub fn context(project: &Project, target: &TargetArgs) -> Result<()> {
    let request = project.request(target)?;
    let page = lookup_page(project, &request);
    let ctx = build_seo_context(&project.env(&request), page);
    println!("{}", serde_json::to_string_pretty(&ctx)?);
    Ok(())
}

/// Print a per-site text file; unconfigured ads/security files are errors.
pub fn text(project: &Project, kind: TextKind, target: &TargetArgs) -> Result<()> {
    let request = project.request(target)?;
    let body = text_body(&project.env(&request), kind)?;
    println!("{body}");
    Ok(())
}

/// Body of one text file for the request's site.
pub fn text_body(env: &SeoEnv<'_>, kind: TextKind) -> Result<String, WellKnownError> {
    match kind {
        TextKind::Robots => Ok(robots_txt(env)),
        TextKind::Ads => ads_txt(env),
        TextKind::Security => security_txt(env),
    }
}

/// A minimal HTML document carrying the head and JSON-LD blocks.
pub fn preview_page(env: &SeoEnv<'_>, page: &Page) -> String {
    let ctx = build_seo_context(env, Some(page));
    let head = render_head(&ctx);
    let schema = render_schema(&build_schemas(env, Some(page)));

    let mut html = String::with_capacity(head.len() + schema.len() + 256);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n<head>\n", escape(&ctx.html_lang)));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&head);
    html.push('\n');
    if !schema.is_empty() {
        html.push_str(&schema);
        html.push('\n');
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(&page.title)));
    if !page.search_description.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", escape(&page.search_description)));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn lookup_page<'a>(project: &'a Project, request: &RequestContext) -> Option<&'a Page> {
    let page = project.page(request);
    if page.is_none() {
        log!("render"; "no page at `{}`, rendering site-level output only", request.path());
    } else {
        debug!("render"; "page `{}`", request.path());
    }
    page
}
