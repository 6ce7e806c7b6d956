use crate::inertia;
use actix_web::http::header::HeaderName;

pub const X_INERTIA: HeaderName = HeaderName::from_static(inertia::X_INERTIA);
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static(inertia::X_INERTIA_LOCATION);
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static(inertia::X_INERTIA_VERSION);
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_COMPONENT);
pub const X_INERTIA_PARTIAL_DATA: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_DATA);
pub const X_INERTIA_PARTIAL_EXCEPT: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_EXCEPT);
pub const X_REQUESTED_WITH: HeaderName = HeaderName::from_static(inertia::X_REQUESTED_WITH);

/// Inertia protocol headers, ready to be handed to actix-web's `insert_header`.
///
/// Values are converted lazily by actix-web, so an invalid value (e.g. a location
/// with control characters) turns into an error response instead of a panic.
pub enum InertiaHeader<'a> {
    Inertia,
    RequestedWith,
    InertiaLocation(&'a str),
    InertiaPartialComponent(&'a str),
    InertiaPartialData(Vec<&'a str>),
    InertiaPartialExcept(Vec<&'a str>),
    Version(&'a str),
    Vary,
}

impl InertiaHeader<'_> {
    pub fn convert(&self) -> (HeaderName, String) {
        match self {
            Self::Inertia => (X_INERTIA, "true".into()),
            Self::RequestedWith => (X_REQUESTED_WITH, "XMLHttpRequest".into()),
            Self::Version(version) => (X_INERTIA_VERSION, version.to_string()),
            Self::InertiaLocation(path) => (X_INERTIA_LOCATION, path.to_string()),
            Self::InertiaPartialComponent(component) => {
                (X_INERTIA_PARTIAL_COMPONENT, component.to_string())
            }
            Self::InertiaPartialData(partials) => (X_INERTIA_PARTIAL_DATA, partials.join(",")),
            Self::InertiaPartialExcept(partials) => {
                (X_INERTIA_PARTIAL_EXCEPT, partials.join(","))
            }
            Self::Vary => (actix_web::http::header::VARY, "X-Inertia".into()),
        }
    }
}
