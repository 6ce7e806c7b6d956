use crate::inertia::Component;
use crate::version::AssetVersion;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response containing a valid Inertia Payload that will be used
/// by the Inertia client to render the components.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct InertiaPage {
    /// The name of the JavaScript page component.
    pub(crate) component: Component,
    /// The page props (data). A merge of shared props and page props.
    pub(crate) props: Map<String, Value>,
    /// Page's URL: the current request's path and query string.
    pub(crate) url: String,
    /// Current assets version.
    pub(crate) version: AssetVersion,
}

impl InertiaPage {
    /// Instantiates an Inertia Page object to sent as http response,
    /// according to [Inertia Protocol].
    ///
    /// [Inertia Protocol]: https://inertiajs.com/the-protocol
    ///
    /// # Arguments
    /// * `component`   -   The name of the javascript page component (e.g. "Users/Index").
    /// * `url`         -   The requested path, query string included ("/users?page=2").
    /// * `version`     -   Current assets version. Used to assert assets are up-to-date. See
    ///                     [Inertia's assets versioning] page for more details.
    /// * `props`       -   A map of the page's already resolved props.
    ///
    /// [Inertia's assets versioning]: https://inertiajs.com/the-protocol#asset-versioning
    pub fn new(
        component: Component,
        url: String,
        version: AssetVersion,
        props: Map<String, Value>,
    ) -> Self {
        InertiaPage {
            component,
            url,
            props,
            version,
        }
    }

    pub fn get_component(&self) -> &Component {
        &self.component
    }

    pub fn get_props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    pub fn get_version(&self) -> &AssetVersion {
        &self.version
    }
}
