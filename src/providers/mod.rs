mod actix_provider;

pub mod actix {
    pub use super::actix_provider::facade::{location, render, render_with_props, share};
    pub use super::actix_provider::middleware::InertiaMiddleware;
    pub use super::actix_provider::{facade, headers, middleware};
}
