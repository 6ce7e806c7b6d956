use inertia_adapter::{InertiaError, TemplateResolverOutput, ViewData};
use std::path::Path;

pub const ROOT_LAYOUT: &str = "tests/common/root_layout.html";

pub const EXPECTED_RENDER: &str = r#"
<!doctype html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, user-scalable=no, initial-scale=1.0, maximum-scale=1.0, minimum-scale=1.0">
    <meta http-equiv="X-UA-Compatible" content="ie=edge">

</head>
<body>
    <div id="page" data-page="{&quot;component&quot;:&quot;Index&quot;,&quot;props&quot;:{&quot;custom_data&quot;:&quot;custom_value&quot;},&quot;url&quot;:&quot;/&quot;,&quot;version&quot;:1}"></div>
</body>
</html>
"#;

/// Renders the page JSON as is, so tests can look for plain JSON fragments in the html.
async fn _mocked_resolver(template_path: &str, view_data: ViewData) -> Result<String, InertiaError> {
    let path = Path::new(template_path);

    let html = match tokio::fs::read_to_string(&path).await {
        Ok(html) => html,
        Err(err) => {
            return Err(InertiaError::TemplateError(format!(
                "Failed to open root layout at {}: {:#}",
                path.display(),
                err
            )))
        }
    };

    let stringified_page = serde_json::to_string(&view_data.page)
        .map_err(|err| InertiaError::SerializationError(err.to_string()))?;

    let title = view_data
        .custom_props
        .get("title")
        .and_then(|title| title.as_str())
        .unwrap_or_default();

    let container = format!("<div id=\"page\" data-page='{stringified_page}'></div>");
    Ok(html
        .replace("@inertia::body", &container)
        .replace("@inertia::head", &format!("<title>{title}</title>")))
}

pub fn mocked_resolver(
    template_path: &'static str,
    view_data: ViewData,
    _data: &'static (),
) -> TemplateResolverOutput {
    Box::pin(_mocked_resolver(template_path, view_data))
}
