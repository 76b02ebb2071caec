//! Frozen outcome of resolved local component extraction.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use strata_core::component::{ComponentIdentifier, ProjectComponentIdentifier};
use strata_core::metadata::BuildActionRef;

/// Local components consumed by one resolution request.
///
/// `project_configurations` feeds build ordering (build configuration C of
/// project P before the result is consumed); `build_dependencies` feeds
/// build action selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocalComponents {
    pub(crate) project_configurations: BTreeMap<ProjectComponentIdentifier, BTreeSet<String>>,
    pub(crate) build_dependencies: BTreeMap<ComponentIdentifier, BTreeSet<BuildActionRef>>,
}

impl ResolvedLocalComponents {
    pub fn project_configurations(&self) -> &BTreeMap<ProjectComponentIdentifier, BTreeSet<String>> {
        &self.project_configurations
    }

    pub fn build_dependencies(&self) -> &BTreeMap<ComponentIdentifier, BTreeSet<BuildActionRef>> {
        &self.build_dependencies
    }

    /// Every consumed (project, configuration) pair, sorted by project path.
    pub fn resolved_project_configurations(
        &self,
    ) -> impl Iterator<Item = (&ProjectComponentIdentifier, &str)> {
        self.project_configurations
            .iter()
            .flat_map(|(project, names)| names.iter().map(move |n| (project, n.as_str())))
    }

    pub fn configurations_of(&self, project: &ProjectComponentIdentifier) -> Option<&BTreeSet<String>> {
        self.project_configurations.get(project)
    }

    /// Paths of the configuration build actions that must run before the
    /// resolution result is consumable, e.g. `:lib:api`.
    pub fn build_ordering_paths(&self) -> Vec<String> {
        self.resolved_project_configurations()
            .map(|(project, configuration)| project.configuration_path(configuration))
            .collect()
    }

    pub fn components_with_build_dependencies(&self) -> impl Iterator<Item = &ComponentIdentifier> {
        self.build_dependencies.keys()
    }

    pub fn build_dependencies_of(&self, component: &ComponentIdentifier) -> Option<&BTreeSet<BuildActionRef>> {
        self.build_dependencies.get(component)
    }

    /// Union of the build actions of every consumed local configuration.
    pub fn required_build_dependencies(&self) -> BTreeSet<BuildActionRef> {
        self.build_dependencies.values().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.project_configurations.is_empty() && self.build_dependencies.is_empty()
    }

    /// Union `other` into `self`.
    ///
    /// Merging is associative, commutative and idempotent, so results of
    /// independently traversed branches can be combined in any order.
    pub fn merge(&mut self, other: ResolvedLocalComponents) {
        for (project, names) in other.project_configurations {
            self.project_configurations.entry(project).or_default().extend(names);
        }
        for (component, deps) in other.build_dependencies {
            self.build_dependencies.entry(component).or_default().extend(deps);
        }
    }
}

impl Serialize for ResolvedLocalComponents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let projects: BTreeMap<&str, &BTreeSet<String>> = self
            .project_configurations
            .iter()
            .map(|(project, names)| (project.path.as_str(), names))
            .collect();
        let build_deps: BTreeMap<String, &BTreeSet<BuildActionRef>> = self
            .build_dependencies
            .iter()
            .map(|(component, deps)| (component.to_string(), deps))
            .collect();

        let mut state = serializer.serialize_struct("ResolvedLocalComponents", 2)?;
        state.serialize_field("project_configurations", &projects)?;
        state.serialize_field("build_dependencies", &build_deps)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(project: &str, configuration: &str, action: &str) -> ResolvedLocalComponents {
        let id = ProjectComponentIdentifier::new(project);
        let mut result = ResolvedLocalComponents::default();
        result
            .project_configurations
            .entry(id.clone())
            .or_default()
            .insert(configuration.to_string());
        result
            .build_dependencies
            .entry(id.into())
            .or_default()
            .insert(BuildActionRef::new(action));
        result
    }

    #[test]
    fn merge_is_commutative() {
        let a = sample(":a", "api", ":a:jar");
        let b = sample(":b", "runtime", ":b:jar");

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn merge_is_idempotent() {
        let a = sample(":a", "api", ":a:jar");
        let mut twice = a.clone();
        twice.merge(a.clone());
        assert_eq!(twice, a);
    }

    #[test]
    fn merge_unions_same_project() {
        let mut a = sample(":a", "api", ":a:jar");
        a.merge(sample(":a", "test", ":a:testJar"));
        let id = ProjectComponentIdentifier::new(":a");
        assert_eq!(a.configurations_of(&id).map(|c| c.len()), Some(2));
        assert_eq!(a.required_build_dependencies().len(), 2);
    }

    #[test]
    fn ordering_paths_are_sorted() {
        let mut result = sample(":b", "api", ":b:jar");
        result.merge(sample(":a", "runtime", ":a:jar"));
        assert_eq!(result.build_ordering_paths(), vec![":a:runtime", ":b:api"]);
    }

    #[test]
    fn default_is_empty() {
        assert!(ResolvedLocalComponents::default().is_empty());
        assert!(!sample(":a", "api", ":a:jar").is_empty());
    }
}
