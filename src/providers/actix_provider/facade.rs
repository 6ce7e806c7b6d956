use super::headers::InertiaHeader;
use super::impls::ShareContext;
use crate::inertia::InertiaResponder;
use crate::share::share_value;
use crate::utils::inertia_err_msg;
use crate::{Component, Inertia, InertiaError, InertiaProps};
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde_json::Value;

/// Short for calling `render` from the `Inertia` instance configured and added to the request
/// AppData.
///
/// # Arguments
/// * `req`         -   A reference to the HttpRequest.
/// * `component`   -   The name of the page javascript component.
///
/// # Panic
/// Panics if Inertia instance hasn't been configured (set to AppData).
pub async fn render<T>(req: &HttpRequest, component: Component) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia = extract_inertia::<T>(req);
    inertia.render(req, component).await
}

/// Short for calling `render_with_props` from the `Inertia` instance configured and added to the request
/// AppData.
///
/// # Arguments
/// * `req`         -   A reference to the HttpRequest.
/// * `component`   -   The name of the page javascript component.
/// * `props`       -   The page props.
///
/// # Panic
/// Panics if Inertia instance hasn't been configured (set to AppData).
pub async fn render_with_props<T>(
    req: &HttpRequest,
    component: Component,
    props: InertiaProps,
) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia: &Inertia<T> = extract_inertia(req);
    inertia.render_with_props(req, component, props).await
}

/// Shares `value` under `key` with every page rendered during this request's session.
///
/// Meant to be called from the share hook or from handlers behind
/// [`InertiaMiddleware`](super::middleware::InertiaMiddleware). Outside of those, use
/// [`Inertia::share`].
///
/// # Errors
/// Returns [`InertiaError::ConfigurationError`] if Inertia has not prepared the request yet,
/// or whatever the session store fails with.
pub fn share(req: &HttpRequest, key: impl Into<String>, value: Value) -> Result<(), InertiaError> {
    let store = req
        .extensions()
        .get::<ShareContext>()
        .map(|context| context.0.clone());

    let Some(store) = store else {
        return Err(InertiaError::ConfigurationError(inertia_err_msg(
            "Cannot share props on a request Inertia hasn't seen. Please, assure InertiaMiddleware wraps this route.".into(),
        )));
    };

    share_value(store.as_ref(), req, key.into(), value)
}

/// A `409 Conflict` carrying `url` in the `X-Inertia-Location` header. The Inertia client
/// answers it with a full `window.location` visit, which is how to redirect to external
/// websites (or non-Inertia pages) from an Inertia request.
pub fn location(url: &str) -> HttpResponse {
    HttpResponseBuilder::new(StatusCode::CONFLICT)
        .insert_header(InertiaHeader::InertiaLocation(url).convert())
        .finish()
}

fn extract_inertia<T>(req: &HttpRequest) -> &Inertia<T>
where
    T: 'static,
{
    match req.app_data::<Data<Inertia<T>>>() {
        None => panic!("{}", &inertia_err_msg("There is no Inertia struct in AppData. Please, assure you have correctly configured Inertia.".into())),
        Some(inertia) => inertia.get_ref(),
    }
}
