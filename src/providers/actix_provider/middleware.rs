use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, StatusCode};
use actix_web::web::Data;
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::marker::PhantomData;

use crate::inertia::InertiaHttpRequest;
use crate::utils::inertia_err_msg;
use crate::{Inertia, InertiaError};

/// Runs the share hook for every request, answers Inertia requests made with outdated
/// assets with a `409 Conflict` and turns redirects after PUT, PATCH and DELETE requests
/// into `303 See Other`.
///
/// `TInertia` is the template resolver data type of the `Inertia<TInertia>` registered
/// in AppData.
pub struct InertiaMiddleware<TInertia> {
    _p: PhantomData<TInertia>,
}

impl<TInertia> Default for InertiaMiddleware<TInertia>
where
    TInertia: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<TInertia> InertiaMiddleware<TInertia>
where
    TInertia: 'static,
{
    pub fn new() -> Self {
        Self {
            _p: PhantomData::<TInertia>,
        }
    }
}

// Middleware factory is `Transform` trait
// `S` - type of the next service
// `B` - type of response's body
impl<S, B, TInertia> Transform<S, ServiceRequest> for InertiaMiddleware<TInertia>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    TInertia: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = InertiaMiddlewareService<S, TInertia>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InertiaMiddlewareService {
            service,
            _p: PhantomData::<TInertia>,
        }))
    }
}

pub struct InertiaMiddlewareService<S, TInertia>
where
    TInertia: 'static,
{
    service: S,
    _p: PhantomData<TInertia>,
}

#[inline]
fn must_see_other(method: &Method, status: StatusCode) -> bool {
    [Method::PATCH, Method::PUT, Method::DELETE].contains(method)
        && status.is_redirection()
        && status != StatusCode::NOT_MODIFIED
        && status != StatusCode::SEE_OTHER
}

impl<S, B, TInertia> Service<ServiceRequest> for InertiaMiddlewareService<S, TInertia>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    TInertia: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(inertia) = req.app_data::<Data<Inertia<TInertia>>>().cloned() else {
            let err = InertiaError::ConfigurationError(inertia_err_msg(
                "There is no Inertia struct in AppData. Please, assure you have correctly configured Inertia.".into(),
            ));
            return Box::pin(async move { Err::<Self::Response, Error>(err.into()) });
        };

        if let Err(err) = inertia.prepare_request(req.request()) {
            return Box::pin(async move { Err::<Self::Response, Error>(err.into()) });
        }

        // check inertia version and force a refresh if the client assets are outdated
        let http_req = req.request();
        if http_req.is_inertia_request()
            && http_req.method() == Method::GET
            && !http_req.check_inertia_version(&inertia.get_version())
        {
            let response = inertia.version_conflict(http_req);
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok::<Self::Response, Error>(res) });
        }

        let fut: <S as Service<ServiceRequest>>::Future = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let res_status = res.status();
            if must_see_other(res.request().method(), res_status) {
                log::debug!(
                    "{}",
                    inertia_err_msg(format!(
                        "Rewriting {} redirect after {} {} to 303.",
                        res_status.as_u16(),
                        res.request().method(),
                        res.request().path()
                    ))
                );

                let res = res.response_mut();
                *res.status_mut() = StatusCode::SEE_OTHER;
            }

            Ok(res.map_into_left_body())
        })
    }
}
