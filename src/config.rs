use crate::error::InertiaError;
use crate::inertia::{ShareHook, TemplateResolver};
use crate::share::SessionStore;
use crate::version::InertiaVersion;
use actix_web::HttpRequest;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A configuration struct for initializing Inertia. You can directly fill the struct or use
/// the builder fluent syntax by calling `InertiaConfig::builder()`, and finally `InertiaConfig::build()`.
///
/// Note that, even with builder, most of fields are mandatory and trying to build without filling them
/// will cause your application to `panic!`
///
/// * `url`                     -   A valid [href](https://developer.mozilla.org/en-US/docs/Web/API/Location)
///                                 of the current application. Used to build absolute locations for
///                                 requests that carry no `Host` header.
/// * `version`                 -   The current asset version of the application.
///                                 See [Asset versioning](https://inertiajs.com/asset-versioning) for more
///                                 details.
/// * `template_path`           -   The path for the root html template.
/// * `template_resolver`       -   A function that renders the given root template html. Check
///                                 more details at [`Inertia::template_resolver`] document string.
/// * `template_resolver_data`  -   The third parameter of your template resolver. Inertia will
///                                 pass it by reference when calling the resolver function.
///                                 If you don't plan to use it, just pass an empty tuple (both here
///                                 and in your template resolver).
/// * `view_data`               -   Optional view data to be passed to the root template. It must be
///                                 handled by the provided `template_resolver`.
/// * `share_hook`              -   Optional function called once per request, before rendering,
///                                 to share props with every page.
/// * `session_store`           -   Where shared props are kept. Defaults to a
///                                 [`MemorySessionStore`](crate::MemorySessionStore).
///
/// [`Inertia::template_resolver`]: crate::inertia::Inertia
pub struct InertiaConfig<T>
where
    T: 'static,
{
    pub url: &'static str,
    pub version: InertiaVersion,
    pub template_path: &'static str,
    pub template_resolver: TemplateResolver<T>,
    pub template_resolver_data: &'static T,
    pub view_data: Option<Map<String, Value>>,
    pub share_hook: Option<ShareHook>,
    pub session_store: Option<Arc<dyn SessionStore<HttpRequest>>>,
}

impl<T> InertiaConfig<T>
where
    T: 'static,
{
    /// Instatiates a new InertiaConfigBuilder instance. It must be configured using a fluent syntax.
    ///
    /// # Examples
    /// ```rust
    /// use inertia_adapter::{InertiaVersion, InertiaConfig};
    /// # use inertia_adapter::{TemplateResolverOutput, ViewData, InertiaError};
    /// # async fn _your_template_resolver(_template_path: &str, _view_data: ViewData) -> Result<String, InertiaError> {
    /// #     return Ok("".to_string());
    /// # }
    /// #
    /// # pub fn your_template_resolver(template_path: &'static str, view_data: ViewData, _data: &()) -> TemplateResolverOutput {
    /// #     Box::pin(_your_template_resolver(template_path, view_data))
    /// # }
    /// #
    /// let inertia_config = InertiaConfig::builder()
    ///     .set_url("http://localhost:8080")
    ///     .set_version(InertiaVersion::literal("v1"))
    ///     .set_template_path("path/to/template.html")
    ///     .set_template_resolver(&your_template_resolver)
    ///     .set_template_resolver_data(&())
    ///     .build();
    /// ```
    pub fn builder() -> InertiaConfigBuilder<T> {
        InertiaConfigBuilder::new()
    }
}

pub struct InertiaConfigBuilder<T>
where
    T: 'static,
{
    pub url: Option<&'static str>,
    pub version: Option<InertiaVersion>,
    pub template_path: Option<&'static str>,
    pub template_resolver: Option<TemplateResolver<T>>,
    pub template_resolver_data: Option<&'static T>,
    pub view_data: Option<Map<String, Value>>,
    pub share_hook: Option<ShareHook>,
    pub session_store: Option<Arc<dyn SessionStore<HttpRequest>>>,
}

impl<T> Default for InertiaConfigBuilder<T>
where
    T: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InertiaConfigBuilder<T>
where
    T: 'static,
{
    pub fn new() -> Self {
        Self {
            url: None,
            version: None,
            template_path: None,
            template_resolver: None,
            template_resolver_data: None,
            view_data: None,
            share_hook: None,
            session_store: None,
        }
    }

    pub fn set_url(mut self, url: &'static str) -> Self {
        self.url = Some(url);
        self
    }

    pub fn set_version(mut self, version: InertiaVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn set_template_path(mut self, template_path: &'static str) -> Self {
        self.template_path = Some(template_path);
        self
    }

    pub fn set_template_resolver(mut self, template_resolver: TemplateResolver<T>) -> Self {
        self.template_resolver = Some(template_resolver);
        self
    }

    pub fn set_template_resolver_data(mut self, data: &'static T) -> Self {
        self.template_resolver_data = Some(data);
        self
    }

    pub fn set_view_data(mut self, view_data: Map<String, Value>) -> Self {
        self.view_data = Some(view_data);
        self
    }

    /// Sets the function that runs once per request, before any rendering.
    ///
    /// # Examples
    /// ```rust,ignore
    /// builder.set_share_hook(|req| {
    ///     inertia_adapter::actix::share(req, "appName", "My App".into())
    /// })
    /// ```
    pub fn set_share_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<(), InertiaError> + Send + Sync + 'static,
    {
        self.share_hook = Some(Arc::new(hook));
        self
    }

    pub fn set_session_store<S>(mut self, store: S) -> Self
    where
        S: SessionStore<HttpRequest> + 'static,
    {
        self.session_store = Some(Arc::new(store));
        self
    }

    /// Compile the current `InertiaConfigBuilder` into a valid `InertiaConfig` struct.
    ///
    /// # Panics
    /// Panics if any of the following fields equal [`None`]:
    /// * `url`
    /// * `template_path`
    /// * `template_resolver`
    /// * `template_resolver_data`
    /// * `version`
    pub fn build(self) -> InertiaConfig<T> {
        let Some(url) = self.url else {
            panic!("[InertiaConfigBuilder] 'url' is a mandatory field and InertiaConfigBuilder cannot build without it.");
        };

        let Some(template_path) = self.template_path else {
            panic!("[InertiaConfigBuilder] 'template_path' is a mandatory field and InertiaConfigBuilder cannot build without it.");
        };

        let Some(template_resolver) = self.template_resolver else {
            panic!("[InertiaConfigBuilder] 'template_resolver' is a mandatory field and InertiaConfigBuilder cannot build without it.");
        };

        let Some(template_resolver_data) = self.template_resolver_data else {
            panic!("[InertiaConfigBuilder] 'template_resolver_data' is a mandatory field and InertiaConfigBuilder cannot build without it.");
        };

        let Some(version) = self.version else {
            panic!("[InertiaConfigBuilder] 'version' is a mandatory field and InertiaConfigBuilder cannot build without it.");
        };

        InertiaConfig {
            url,
            template_path,
            template_resolver,
            template_resolver_data,
            version,
            view_data: self.view_data,
            share_hook: self.share_hook,
            session_store: self.session_store,
        }
    }
}
