mod config;
mod error;
mod inertia;
mod page;
mod props;
mod providers;
mod req_type;
mod resolvers;
mod share;
mod utils;
mod version;

pub use config::{InertiaConfig, InertiaConfigBuilder};
pub use error::InertiaError;
pub use inertia::{
    Component, Inertia, InertiaResponder, InertiaService, ShareHook, TemplateResolver,
    TemplateResolverOutput, ViewData,
};
pub use page::InertiaPage;
pub use props::{InertiaProp, InertiaProps};
pub use providers::actix;
pub use resolvers::{basic_template_resolver, page_container};
pub use share::{MemorySessionStore, SessionStore, SHARE_SESSION_KEY};
pub use version::{AssetVersion, InertiaVersion};

pub mod header_names {
    pub use crate::inertia::{
        X_INERTIA, X_INERTIA_LOCATION, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA,
        X_INERTIA_PARTIAL_EXCEPT, X_INERTIA_VERSION, X_REQUESTED_WITH,
    };
}
