use serde::{Deserialize, Serialize};
use std::fmt;

/// The assets version, as sent in the page object and compared against the
/// `X-Inertia-Version` header. Versions are opaque: only equality matters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AssetVersion {
    Number(i64),
    Text(String),
}

impl AssetVersion {
    /// Checks whether the version sent by the client, in its raw header form,
    /// equals this one.
    pub fn matches(&self, header_value: &str) -> bool {
        match self {
            AssetVersion::Text(version) => version == header_value,
            AssetVersion::Number(version) => header_value
                .trim()
                .parse::<i64>()
                .map_or(false, |client| client == *version),
        }
    }
}

impl fmt::Display for AssetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetVersion::Number(version) => write!(f, "{}", version),
            AssetVersion::Text(version) => write!(f, "{}", version),
        }
    }
}

impl From<&str> for AssetVersion {
    fn from(value: &str) -> Self {
        AssetVersion::Text(value.to_string())
    }
}

impl From<String> for AssetVersion {
    fn from(value: String) -> Self {
        AssetVersion::Text(value)
    }
}

impl From<i64> for AssetVersion {
    fn from(value: i64) -> Self {
        AssetVersion::Number(value)
    }
}

impl From<i32> for AssetVersion {
    fn from(value: i32) -> Self {
        AssetVersion::Number(value.into())
    }
}

impl From<u32> for AssetVersion {
    fn from(value: u32) -> Self {
        AssetVersion::Number(value.into())
    }
}

type VersionResolver = Box<dyn Fn() -> AssetVersion + Send + Sync>;

/// Where the current assets version comes from.
///
/// A `Resolver` is called every time the version is needed; it is never cached,
/// so a closure reading, e.g., a manifest hash will pick up new builds.
pub enum InertiaVersion {
    Literal(AssetVersion),
    Resolver(VersionResolver),
}

impl InertiaVersion {
    pub fn literal<V>(version: V) -> Self
    where
        V: Into<AssetVersion>,
    {
        InertiaVersion::Literal(version.into())
    }

    pub fn resolver<F, V>(resolver: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<AssetVersion>,
    {
        InertiaVersion::Resolver(Box::new(move || resolver().into()))
    }

    pub fn resolve(&self) -> AssetVersion {
        match self {
            InertiaVersion::Literal(version) => version.clone(),
            InertiaVersion::Resolver(resolver) => resolver(),
        }
    }
}
