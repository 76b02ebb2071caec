//! Per-configuration metadata of resolved components.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a build action (task) that must run to produce artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildActionRef(String);

impl BuildActionRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BuildActionRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Metadata of a configuration that belongs to a project of the current build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfigurationMetadata {
    /// Build actions that produce this configuration's artifacts.
    #[serde(default, rename = "direct-build-dependencies")]
    pub direct_build_dependencies: BTreeSet<BuildActionRef>,
}

/// Metadata attached to a resolved configuration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConfigurationMetadata {
    Local(LocalConfigurationMetadata),
    /// Published artifacts; nothing needs to be built to consume them.
    External,
}

impl ConfigurationMetadata {
    /// Local metadata with the given direct build dependencies.
    pub fn local<I, T>(deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BuildActionRef>,
    {
        Self::Local(LocalConfigurationMetadata {
            direct_build_dependencies: deps.into_iter().map(Into::into).collect(),
        })
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Direct build dependencies, or `None` for external metadata.
    pub fn direct_build_dependencies(&self) -> Option<&BTreeSet<BuildActionRef>> {
        match self {
            Self::Local(local) => Some(&local.direct_build_dependencies),
            Self::External => None,
        }
    }
}
