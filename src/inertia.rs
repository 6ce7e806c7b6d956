use crate::config::InertiaConfig;
use crate::error::InertiaError;
use crate::page::InertiaPage;
use crate::props::InertiaProps;
use crate::req_type::PartialComponent;
use crate::share::{MemorySessionStore, SessionStore};
use crate::version::{AssetVersion, InertiaVersion};
use actix_web::HttpRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub const X_INERTIA: &str = "x-inertia";
pub const X_INERTIA_LOCATION: &str = "x-inertia-location";
pub const X_INERTIA_VERSION: &str = "x-inertia-version";
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "x-inertia-partial-component";
pub const X_INERTIA_PARTIAL_DATA: &str = "x-inertia-partial-data";
pub const X_INERTIA_PARTIAL_EXCEPT: &str = "x-inertia-partial-except";
pub const X_REQUESTED_WITH: &str = "x-requested-with";

/// The javascript component name.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Component(pub String);

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component(value.to_string())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Component(value)
    }
}

/// InertiaResponder trait defines the rendering methods of an Inertia adapter
/// for a given http library. `TResponder` is what the handlers return (an actix-web
/// `HttpResponse`, for instance) and `THttpReq` is that library's request.
#[async_trait(?Send)] // it's `?Send` because some frameworks like Actix won't require requests to be thread-safe
pub trait InertiaResponder<TResponder, THttpReq> {
    /// Renders an Inertia Page as an HTTP response.
    ///
    /// # Arguments
    /// * `req`         -   The HTTP request.
    /// * `component`   -   The page javascript component name to be rendered by the
    ///                     client-side adapter.
    async fn render(&self, req: &THttpReq, component: Component)
        -> Result<TResponder, InertiaError>;

    /// Renders an Inertia Page with props as an HTTP response.
    ///
    /// # Arguments
    /// * `req`         -   The HTTP request.
    /// * `component`   -   The page component to be rendered by the client-side adapter.
    /// * `props`       -   The page props. They are merged over the shared props.
    ///
    /// # Errors
    /// Fails if the share hook, the session store or the template resolver fail.
    async fn render_with_props(
        &self,
        req: &THttpReq,
        component: Component,
        props: InertiaProps,
    ) -> Result<TResponder, InertiaError>;

    /// Redirects to `url`. Inertia requests get a `409 Conflict` carrying the location, so
    /// the client performs a full visit; any other request gets a regular redirect.
    fn location(req: &THttpReq, url: &str) -> TResponder;
}

/// Defines some helper methods to be implemented to HttpRequests from the
/// library opted by the cargo feature.
pub(crate) trait InertiaHttpRequest {
    /// Whether the request was sent by the Inertia client (`X-Inertia` is set and
    /// `X-Requested-With` is `XMLHttpRequest`).
    fn is_inertia_request(&self) -> bool;

    /// Reads the partial reload headers. Missing or unreadable headers yield `None`.
    fn get_partial_component(&self) -> Option<PartialComponent>;

    /// Checks whether the client assets version equals `current_version`.
    fn check_inertia_version(&self, current_version: &AssetVersion) -> bool;

    /// The request path, query string included.
    fn full_path(&self) -> String;
}

/// View Data is a struct containing props to be used by the root template.
pub struct ViewData {
    pub page: InertiaPage,
    pub custom_props: Map<String, Value>,
}

pub type TemplateResolverOutput = Pin<Box<dyn Future<Output = Result<String, InertiaError>>>>;
pub type TemplateResolver<T> =
    &'static (dyn Fn(&'static str, ViewData, &'static T) -> TemplateResolverOutput + Send + Sync);

/// Called once per request, before anything is rendered. It is meant to
/// [`share`] whatever every page needs (the authenticated user, flash messages...).
///
/// [`share`]: crate::actix::share
pub type ShareHook = Arc<dyn Fn(&HttpRequest) -> Result<(), InertiaError> + Send + Sync>;

/// Registers routes that directly render a component, without a handler.
pub trait InertiaService {
    fn inertia_route<T>(self, path: &str, component: &'static str) -> Self
    where
        T: 'static;
}

/// Inertia struct must be a singleton and initialized at the application bootstrap.
/// It is supposed to last during the whole application runtime.
///
/// With actix-web, wrap it in `Data` and register it with `App::app_data`.
pub struct Inertia<T>
where
    T: 'static,
{
    /// URL used to build absolute locations, i.g. "https://myapp.com".
    pub(crate) url: &'static str,
    /// The path to find the root html template to render everything in.
    pub(crate) template_path: &'static str,
    /// The current assets version.
    pub(crate) version: InertiaVersion,
    /// A function responsible for rendering the root template
    /// with the given **view data**.
    ///
    /// Since Rust does not offer a standard template engine, this is left to the
    /// application. [`basic_template_resolver`] covers the simple cases.
    ///
    /// [`basic_template_resolver`]: crate::basic_template_resolver
    pub(crate) template_resolver: TemplateResolver<T>,
    /// Data handed over to `template_resolver` on every call.
    pub(crate) template_resolver_data: &'static T,
    /// Extra data to be passed to the root template.
    pub(crate) custom_view_data: Map<String, Value>,
    pub(crate) share_hook: Option<ShareHook>,
    pub(crate) session_store: Arc<dyn SessionStore<HttpRequest>>,
}

impl<T> Inertia<T>
where
    T: 'static,
{
    /// Initializes an instance of [`Inertia`] struct from an [`InertiaConfig`].
    ///
    /// If no session store has been configured, a [`MemorySessionStore`] is used.
    pub fn new(config: InertiaConfig<T>) -> Self {
        let session_store = config
            .session_store
            .unwrap_or_else(|| Arc::new(MemorySessionStore::default()));

        Self {
            url: config.url,
            template_path: config.template_path,
            version: config.version,
            template_resolver: config.template_resolver,
            template_resolver_data: config.template_resolver_data,
            custom_view_data: config.view_data.unwrap_or_default(),
            share_hook: config.share_hook,
            session_store,
        }
    }

    /// Resolves the current assets version.
    pub fn get_version(&self) -> AssetVersion {
        self.version.resolve()
    }

    /// Builds an absolute URL for `path_and_query` on top of the application url.
    pub(crate) fn absolute_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path_and_query)
    }
}
