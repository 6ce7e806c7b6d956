use super::headers::{self, InertiaHeader};

use crate::inertia::{Inertia, InertiaHttpRequest, InertiaResponder, InertiaService, ViewData};
use crate::props::{InertiaProp, InertiaProps};
use crate::req_type::{parse_partial_keys, InertiaRequestType, PartialComponent};
use crate::share::{load_shared, share_value, SessionStore};
use crate::utils::{convert_struct_to_stringified_json, inertia_err_msg};
use crate::version::AssetVersion;
use crate::{Component, InertiaError, InertiaPage};

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest};
use actix_web::http::header::{self, ContentType, HeaderName};
use actix_web::http::StatusCode;
use actix_web::{
    web, App, HttpMessage, HttpRequest, HttpResponse, HttpResponseBuilder, ResponseError,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Marks a request whose share hook already ran, and carries the session store
/// `share` writes to.
#[derive(Clone)]
pub(crate) struct ShareContext(pub Arc<dyn SessionStore<HttpRequest>>);

fn page_response(page: &InertiaPage) -> Result<HttpResponse, InertiaError> {
    let body = convert_struct_to_stringified_json(page)?;

    Ok(HttpResponseBuilder::new(StatusCode::OK)
        .insert_header(InertiaHeader::Inertia.convert())
        .insert_header(InertiaHeader::Vary.convert())
        .insert_header(ContentType::json())
        .body(body))
}

impl<T> Inertia<T>
where
    T: 'static,
{
    /// Runs the share hook, unless it already ran for this request.
    pub(crate) fn prepare_request(&self, req: &HttpRequest) -> Result<(), InertiaError> {
        if req.extensions().contains::<ShareContext>() {
            return Ok(());
        }

        req.extensions_mut()
            .insert(ShareContext(Arc::clone(&self.session_store)));

        match &self.share_hook {
            Some(hook) => hook(req),
            None => Ok(()),
        }
    }

    /// Shares `value` under `key` with every page rendered during the request's session.
    pub fn share(
        &self,
        req: &HttpRequest,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), InertiaError> {
        self.prepare_request(req)?;
        share_value(self.session_store.as_ref(), req, key.into(), value)
    }

    /// The full URL of `req`. Scheme and host come from the request (proxy headers
    /// included); requests that name no host at all fall back to the application url.
    pub(crate) fn request_url(&self, req: &HttpRequest) -> String {
        let names_host = [header::HOST, header::FORWARDED, header::X_FORWARDED_HOST]
            .iter()
            .any(|name| req.headers().contains_key(name));

        if !names_host {
            return self.absolute_url(&req.full_path());
        }

        let conn = req.connection_info();
        format!("{}://{}{}", conn.scheme(), conn.host(), req.full_path())
    }

    /// The `409 Conflict` sent to Inertia requests made with outdated assets, which
    /// makes the client reload the current page.
    pub(crate) fn version_conflict(&self, req: &HttpRequest) -> HttpResponse {
        let url = self.request_url(req);
        log::debug!(
            "{}",
            inertia_err_msg(format!(
                "Assets version mismatch on {}; forcing a full reload.",
                url
            ))
        );

        HttpResponseBuilder::new(StatusCode::CONFLICT)
            .insert_header(InertiaHeader::InertiaLocation(&url).convert())
            .finish()
    }
}

#[async_trait(?Send)]
impl<T> InertiaResponder<HttpResponse, HttpRequest> for Inertia<T>
where
    T: 'static,
{
    #[inline]
    async fn render(
        &self,
        req: &HttpRequest,
        component: Component,
    ) -> Result<HttpResponse, InertiaError> {
        self.render_with_props(req, component, HashMap::new()).await
    }

    async fn render_with_props(
        &self,
        req: &HttpRequest,
        component: Component,
        props: InertiaProps,
    ) -> Result<HttpResponse, InertiaError> {
        self.prepare_request(req)?;

        let mut all_props: InertiaProps = load_shared(self.session_store.as_ref(), req)?
            .into_iter()
            .map(|(key, value)| (key, InertiaProp::Data(value)))
            .collect();
        all_props.extend(props);

        let req_type = InertiaRequestType::for_component(req.get_partial_component(), &component);
        let props = InertiaProp::resolve_props(all_props, &req_type);

        let page = InertiaPage::new(component, req.full_path(), self.get_version(), props);

        // if it's an inertia request, returns an InertiaPage object
        if req.is_inertia_request() {
            return page_response(&page);
        }

        let view_data = ViewData {
            page,
            custom_props: self.custom_view_data.clone(),
        };

        let html = (self.template_resolver)(
            self.template_path,
            view_data,
            self.template_resolver_data,
        )
        .await?;

        Ok(HttpResponseBuilder::new(StatusCode::OK)
            .insert_header(InertiaHeader::Vary.convert())
            .insert_header(ContentType::html())
            .body(html))
    }

    #[inline]
    fn location(req: &HttpRequest, url: &str) -> HttpResponse {
        if !req.is_inertia_request() {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, url))
                .finish();
        }

        HttpResponseBuilder::new(StatusCode::CONFLICT)
            .insert_header(InertiaHeader::InertiaLocation(url).convert())
            .finish()
    }
}

impl ResponseError for InertiaError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponseBuilder::new(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(ContentType::json())
            .body(json!({ "error": self.get_cause() }).to_string())
    }
}

impl<TApp> InertiaService for App<TApp>
where
    TApp: ServiceFactory<
        ServiceRequest,
        Config = (),
        Error = actix_web::error::Error,
        InitError = (),
    >,
{
    fn inertia_route<T>(self, path: &str, component: &'static str) -> Self
    where
        T: 'static,
    {
        self.route(
            path,
            web::get().to(move |req: HttpRequest| async move {
                crate::actix::render::<T>(&req, component.into()).await
            }),
        )
    }
}

impl InertiaHttpRequest for HttpRequest {
    fn is_inertia_request(&self) -> bool {
        let is_inertia = self
            .headers()
            .get(headers::X_INERTIA)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .map_or(false, |value| {
                !value.is_empty() && !value.eq_ignore_ascii_case("false") && value != "0"
            });

        let is_xhr = self
            .headers()
            .get(headers::X_REQUESTED_WITH)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |value| value.trim().eq_ignore_ascii_case("XMLHttpRequest"));

        is_inertia && is_xhr
    }

    fn get_partial_component(&self) -> Option<PartialComponent> {
        let component = read_header(self, &headers::X_INERTIA_PARTIAL_COMPONENT)?;
        let only = read_header(self, &headers::X_INERTIA_PARTIAL_DATA)
            .map(parse_partial_keys)
            .unwrap_or_default();
        let except = read_header(self, &headers::X_INERTIA_PARTIAL_EXCEPT)
            .map(parse_partial_keys)
            .unwrap_or_default();

        Some(PartialComponent {
            component: Component(component.trim().to_string()),
            only,
            except,
        })
    }

    /// A missing version header is a mismatch: the client cannot prove its assets
    /// are up to date.
    fn check_inertia_version(&self, current_version: &AssetVersion) -> bool {
        read_header(self, &headers::X_INERTIA_VERSION)
            .map_or(false, |version| current_version.matches(version))
    }

    fn full_path(&self) -> String {
        match self.uri().path_and_query() {
            Some(path_and_query) => path_and_query.as_str().to_string(),
            None => self.path().to_string(),
        }
    }
}

fn read_header<'a>(req: &'a HttpRequest, header_name: &HeaderName) -> Option<&'a str> {
    let value = req.headers().get(header_name)?;

    match value.to_str() {
        Ok(value) => Some(value),
        Err(_) => {
            log::debug!(
                "{}",
                inertia_err_msg(format!(
                    "Ignoring header {} as it holds non-printable ASCII characters.",
                    header_name
                ))
            );
            None
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::InertiaConfig;
    use crate::inertia::{InertiaHttpRequest, InertiaResponder, ViewData};
    use crate::props::InertiaProp;
    use crate::providers::actix::headers::{
        InertiaHeader, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA,
        X_INERTIA_PARTIAL_EXCEPT,
    };
    use crate::req_type::PartialComponent;
    use crate::{
        AssetVersion, Component, Inertia, InertiaError, InertiaVersion, TemplateResolverOutput,
    };
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;
    use std::collections::HashMap;
    use std::str::from_utf8;

    async fn resolver(
        _path: &str,
        view_data: ViewData,
        _data: &'static (),
    ) -> Result<String, InertiaError> {
        Ok(format!(
            "<div id='page' data-page='{}'><div>",
            serde_json::to_string(&view_data.page).unwrap()
        ))
    }

    fn resolver_wrapper(
        path: &'static str,
        view_data: ViewData,
        _data: &'static (),
    ) -> TemplateResolverOutput {
        Box::pin(resolver(path, view_data, _data))
    }

    fn inertia() -> Inertia<()> {
        Inertia::new(
            InertiaConfig::builder()
                .set_url("https://my-inertia-website.com")
                .set_version(InertiaVersion::resolver(|| "gen_the_version"))
                .set_template_path("/resources/view/template.hbs")
                .set_template_resolver(&resolver_wrapper)
                .set_template_resolver_data(&())
                .build(),
        )
    }

    #[test]
    async fn test_get_partials_requirements() {
        let mut request = test::TestRequest::default();
        request = request.insert_header((X_INERTIA_PARTIAL_COMPONENT, "/Index"));
        request = request.insert_header((X_INERTIA_PARTIAL_DATA, "events,popularUsers")); // not any props but events and popularUsers

        request = request.insert_header((X_INERTIA_PARTIAL_EXCEPT, "auth")); // all props but auth
        let request = request.to_http_request();

        assert_eq!(
            request.get_partial_component(),
            Some(PartialComponent {
                only: vec!["events".to_string(), "popularUsers".to_string()],
                except: vec!["auth".to_string()],
                component: Component("/Index".to_string())
            })
        )
    }

    #[test]
    async fn test_inertia_request_classification() {
        let both = test::TestRequest::get()
            .insert_header(InertiaHeader::Inertia.convert())
            .insert_header(InertiaHeader::RequestedWith.convert())
            .to_http_request();
        assert!(both.is_inertia_request());

        let lowercase_names = test::TestRequest::get()
            .insert_header(("x-Inertia", "true"))
            .insert_header(("x-Requested-With", "XMLHttpRequest"))
            .to_http_request();
        assert!(lowercase_names.is_inertia_request());

        let without_xhr = test::TestRequest::get()
            .insert_header(InertiaHeader::Inertia.convert())
            .to_http_request();
        assert!(!without_xhr.is_inertia_request());

        let falsy = test::TestRequest::get()
            .insert_header(("X-Inertia", "false"))
            .insert_header(InertiaHeader::RequestedWith.convert())
            .to_http_request();
        assert!(!falsy.is_inertia_request());

        assert!(!test::TestRequest::get().to_http_request().is_inertia_request());
    }

    #[test]
    async fn test_version_check() {
        let current = AssetVersion::Number(1);

        let matching = test::TestRequest::get()
            .insert_header(InertiaHeader::Version("1").convert())
            .to_http_request();
        let stale = test::TestRequest::get()
            .insert_header(InertiaHeader::Version("2").convert())
            .to_http_request();
        let missing = test::TestRequest::get().to_http_request();

        assert!(matching.check_inertia_version(&current));
        assert!(!stale.check_inertia_version(&current));
        assert!(!missing.check_inertia_version(&current));
    }

    #[test]
    async fn test_inertia_page() {
        let inertia = inertia();

        let mut props: HashMap<String, InertiaProp> = HashMap::<String, InertiaProp>::new();
        props.insert(
            "title".into(),
            InertiaProp::Data("My website's cool title!".into()),
        );
        props.insert(
            "content".into(),
            InertiaProp::Data("Such a nice content, isn't it?".into()),
        );

        let fake_req = test::TestRequest::get()
            .insert_header(InertiaHeader::Inertia.convert())
            .insert_header(InertiaHeader::RequestedWith.convert())
            .insert_header(InertiaHeader::Version("gen_the_version").convert())
            .uri("/users?page=2")
            .to_http_request();

        let response = inertia
            .render_with_props(&fake_req, Component("Users/Index".into()), props)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-inertia").unwrap(), "true");
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = response.into_body().try_into_bytes().unwrap();
        assert_eq!(
            from_utf8(&body[..]).unwrap(),
            serde_json::to_string(&json!({
                "component": "Users/Index",
                "props": {
                    "content": "Such a nice content, isn't it?",
                    "title": "My website's cool title!"
                },
                "url": "/users?page=2",
                "version": "gen_the_version"
            }))
            .unwrap(),
        );
    }

    #[test]
    async fn test_explicit_props_override_shared_ones() {
        let inertia = inertia();
        let req = test::TestRequest::get()
            .insert_header(InertiaHeader::Inertia.convert())
            .insert_header(InertiaHeader::RequestedWith.convert())
            .to_http_request();

        inertia.share(&req, "title", json!("shared")).unwrap();
        inertia.share(&req, "flash", json!("saved!")).unwrap();

        let mut props = HashMap::new();
        props.insert("title".to_string(), InertiaProp::Data(json!("explicit")));

        let body = inertia
            .render_with_props(&req, "Index".into(), props)
            .await
            .unwrap()
            .into_body()
            .try_into_bytes()
            .unwrap();
        let page: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(page["props"], json!({"flash": "saved!", "title": "explicit"}));
    }

    #[test]
    async fn test_render_runs_the_share_hook_without_middleware() {
        let inertia = Inertia::new(
            InertiaConfig::builder()
                .set_url("https://my-inertia-website.com")
                .set_version(InertiaVersion::literal(1))
                .set_template_path("/resources/view/template.hbs")
                .set_template_resolver(&resolver_wrapper)
                .set_template_resolver_data(&())
                .set_share_hook(|req| {
                    crate::actix::share(req, "custom_data", json!("custom_value"))
                })
                .build(),
        );

        let req = test::TestRequest::get().to_http_request();
        let html = inertia
            .render(&req, "Index".into())
            .await
            .unwrap()
            .into_body()
            .try_into_bytes()
            .unwrap();

        assert_eq!(
            from_utf8(&html[..]).unwrap(),
            r#"<div id='page' data-page='{"component":"Index","props":{"custom_data":"custom_value"},"url":"/","version":1}'><div>"#
        );
    }

    #[test]
    async fn test_location_depends_on_the_request() {
        let inertia_req = test::TestRequest::get()
            .insert_header(InertiaHeader::Inertia.convert())
            .insert_header(InertiaHeader::RequestedWith.convert())
            .to_http_request();
        let response = Inertia::<()>::location(&inertia_req, "https://example.com");
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers().get("x-inertia-location").unwrap(),
            "https://example.com"
        );

        let plain_req = test::TestRequest::get().to_http_request();
        let response = Inertia::<()>::location(&plain_req, "https://example.com");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "https://example.com"
        );
    }
}
