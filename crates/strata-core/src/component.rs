use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a project that is built as part of the current build.
///
/// Projects are addressed by their colon-separated path, e.g. `:app` or
/// `:libs:core`. The root project is `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectComponentIdentifier {
    pub path: String,
}

impl ProjectComponentIdentifier {
    /// Build an identifier from a project path, adding the leading `:` if missing.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with(':') {
            path
        } else {
            format!(":{path}")
        };
        Self { path }
    }

    /// Path of the build action that produces `configuration` of this project,
    /// e.g. `:lib:apiElements`.
    pub fn configuration_path(&self, configuration: &str) -> String {
        if self.path == ":" {
            format!(":{configuration}")
        } else {
            format!("{}:{configuration}", self.path)
        }
    }
}

impl fmt::Display for ProjectComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project {}", self.path)
    }
}

/// Identifier of an externally published module version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleComponentIdentifier {
    pub group: String,
    pub module: String,
    pub version: String,
}

impl ModuleComponentIdentifier {
    /// Parse `"group:module:version"` into an identifier.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, module, version]
                if !group.is_empty() && !module.is_empty() && !version.is_empty() =>
            {
                Some(Self {
                    group: group.to_string(),
                    module: module.to_string(),
                    version: version.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for ModuleComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

/// Identity of a resolved component.
///
/// A component is either a project of the current build, whose artifacts
/// must be built before they can be consumed, or a published module whose
/// artifacts already exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentIdentifier {
    Project(ProjectComponentIdentifier),
    Module(ModuleComponentIdentifier),
}

impl ComponentIdentifier {
    pub fn project(path: impl Into<String>) -> Self {
        Self::Project(ProjectComponentIdentifier::new(path))
    }

    pub fn module(group: &str, module: &str, version: &str) -> Self {
        Self::Module(ModuleComponentIdentifier {
            group: group.to_string(),
            module: module.to_string(),
            version: version.to_string(),
        })
    }

    /// Returns `true` for identifiers of build-local projects.
    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project(_))
    }

    pub fn as_project(&self) -> Option<&ProjectComponentIdentifier> {
        match self {
            Self::Project(id) => Some(id),
            Self::Module(_) => None,
        }
    }
}

impl From<ProjectComponentIdentifier> for ComponentIdentifier {
    fn from(id: ProjectComponentIdentifier) -> Self {
        Self::Project(id)
    }
}

impl From<ModuleComponentIdentifier> for ComponentIdentifier {
    fn from(id: ModuleComponentIdentifier) -> Self {
        Self::Module(id)
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => id.fmt(f),
            Self::Module(id) => id.fmt(f),
        }
    }
}
