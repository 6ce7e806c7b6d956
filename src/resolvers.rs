use crate::page::InertiaPage;
use crate::utils::convert_struct_to_stringified_json;
use crate::{InertiaError, TemplateResolverOutput, ViewData};
use std::path::Path;

const HEAD_DIRECTIVE: &str = "@inertia::head";
const BODY_DIRECTIVE: &str = "@inertia::body";

/// Renders the element the Inertia client boots from: `<div id="page" data-page="...">`,
/// carrying the html-escaped JSON page.
pub fn page_container(page: &InertiaPage) -> Result<String, InertiaError> {
    let stringified_page = convert_struct_to_stringified_json(page)?;

    Ok(format!(
        "<div id=\"page\" data-page=\"{}\"></div>",
        html_escape::encode_double_quoted_attribute(&stringified_page)
    ))
}

async fn _resolver(path: &str, view_data: ViewData) -> Result<String, InertiaError> {
    let path = Path::new(path);
    let file = match tokio::fs::read(&path).await {
        Ok(file) => file,
        Err(err) => {
            return Err(InertiaError::TemplateError(format!(
                "Failed to open root layout at {}: {:#}",
                path.display(),
                err
            )))
        }
    };

    let mut html = match String::from_utf8(file) {
        Err(err) => {
            return Err(InertiaError::TemplateError(format!(
                "Failed to read file contents: {err:?}"
            )))
        }
        Ok(html) => html,
    };

    let container = page_container(&view_data.page)?;
    html = html.replace(BODY_DIRECTIVE, &container);
    html = html.replace(HEAD_DIRECTIVE, "");

    Ok(html)
}

/// A template resolver that needs no template engine. It reads the root layout from
/// `template_path` and replaces `@inertia::body` with the page container and
/// `@inertia::head` with nothing.
///
/// Register it with `set_template_resolver(&basic_template_resolver)` and
/// `set_template_resolver_data(&())`.
pub fn basic_template_resolver(
    template_path: &'static str,
    view_data: ViewData,
    _data: &'static (),
) -> TemplateResolverOutput {
    Box::pin(_resolver(template_path, view_data))
}
