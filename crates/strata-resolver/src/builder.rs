//! Collects the local components consumed by a resolution request.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graph::NodeIndex;
use strata_core::component::{ComponentIdentifier, ProjectComponentIdentifier};
use strata_core::config::ResolutionConfig;
use strata_core::metadata::BuildActionRef;
use strata_util::errors::StrataError;

use crate::result::ResolvedLocalComponents;
use crate::visitor::{DependencyGraphVisitor, NodeRef};

/// Accumulates consumed project configurations and required build actions.
///
/// Every operation is a set union, so recording the same fact twice, or in
/// any order, gives the same result.
#[derive(Debug)]
pub struct ResolvedLocalComponentsBuilder {
    build_project_dependencies: bool,
    project_configurations: BTreeMap<ProjectComponentIdentifier, BTreeSet<String>>,
    build_dependencies: BTreeMap<ComponentIdentifier, BTreeSet<BuildActionRef>>,
}

impl ResolvedLocalComponentsBuilder {
    pub fn new(build_project_dependencies: bool) -> Self {
        Self {
            build_project_dependencies,
            project_configurations: BTreeMap::new(),
            build_dependencies: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self::new(config.build_project_dependencies)
    }

    /// Record that `configuration` of `project` was consumed.
    pub fn project_configuration_resolved(
        &mut self,
        project: &ProjectComponentIdentifier,
        configuration: &str,
    ) {
        let names = self
            .project_configurations
            .entry(project.clone())
            .or_default();
        if names.insert(configuration.to_string()) {
            tracing::trace!("Consumed configuration '{configuration}' of {project}");
        }
    }

    /// Union `deps` into the build actions required for `component`.
    ///
    /// An empty `deps` leaves the builder untouched. Ignored entirely when
    /// project dependencies are not being built.
    pub fn local_component_resolved(
        &mut self,
        component: &ComponentIdentifier,
        deps: &BTreeSet<BuildActionRef>,
    ) {
        if !self.build_project_dependencies || deps.is_empty() {
            return;
        }
        tracing::trace!("{component} requires {} build action(s)", deps.len());
        self.build_dependencies
            .entry(component.clone())
            .or_default()
            .extend(deps.iter().cloned());
    }

    /// Freeze the accumulated state.
    pub fn complete(self) -> ResolvedLocalComponents {
        ResolvedLocalComponents {
            project_configurations: self.project_configurations,
            build_dependencies: self.build_dependencies,
        }
    }
}

impl Default for ResolvedLocalComponentsBuilder {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug)]
struct RootNode {
    index: NodeIndex,
    component: ComponentIdentifier,
}

/// Graph visitor that feeds a [`ResolvedLocalComponentsBuilder`].
///
/// The root's own component is never recorded as a consumed project, and the
/// root node contributes no build actions. Other configurations of the root's
/// project (a test configuration depending on main, say) still do.
#[derive(Debug)]
pub struct ResolvedLocalComponentsVisitor {
    builder: ResolvedLocalComponentsBuilder,
    root: Option<RootNode>,
    finished: bool,
}

impl ResolvedLocalComponentsVisitor {
    pub fn new(builder: ResolvedLocalComponentsBuilder) -> Self {
        Self {
            builder,
            root: None,
            finished: false,
        }
    }

    /// Hand out the frozen result. Only valid after `finish`.
    pub fn complete(self) -> Result<ResolvedLocalComponents, StrataError> {
        if !self.finished {
            return Err(StrataError::traversal(
                "resolved local components requested before the traversal finished",
            ));
        }
        Ok(self.builder.complete())
    }

    fn is_root(&self, node: &NodeRef<'_>) -> bool {
        self.root.as_ref().is_some_and(|root| root.index == node.index)
    }

    fn running_root(&self, callback: &str) -> Result<&RootNode, StrataError> {
        if self.finished {
            return Err(StrataError::traversal(format!(
                "{callback} called after finish"
            )));
        }
        self.root
            .as_ref()
            .ok_or_else(|| StrataError::traversal(format!("{callback} called before start")))
    }
}

impl DependencyGraphVisitor for ResolvedLocalComponentsVisitor {
    fn start(&mut self, root: NodeRef<'_>) -> Result<(), StrataError> {
        if self.root.is_some() || self.finished {
            return Err(StrataError::traversal("start called more than once"));
        }
        tracing::debug!("Collecting resolved local components for {}", root.node);
        self.root = Some(RootNode {
            index: root.index,
            component: root.owner().clone(),
        });
        Ok(())
    }

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), StrataError> {
        let root = self.running_root("visit_node")?;
        let component = node.owner();
        let owned_by_root = *component == root.component;
        let is_root = root.index == node.index;

        if !owned_by_root {
            if let Some(project) = component.as_project() {
                self.builder
                    .project_configuration_resolved(project, node.configuration());
            }
        }

        if !is_root {
            if let Some(deps) = node.metadata().direct_build_dependencies() {
                self.builder.local_component_resolved(component, deps);
            }
        }
        Ok(())
    }

    fn visit_edge(&mut self, _node: NodeRef<'_>) -> Result<(), StrataError> {
        self.running_root("visit_edge")?;
        Ok(())
    }

    fn finish(&mut self, root: NodeRef<'_>) -> Result<(), StrataError> {
        if !self.is_root(&root) {
            self.running_root("finish")?;
            return Err(StrataError::traversal(format!(
                "finish called with {} which is not the root node",
                root.node
            )));
        }
        if self.finished {
            return Err(StrataError::traversal("finish called more than once"));
        }
        self.finished = true;
        tracing::debug!(
            "Resolved {} project(s) and {} component(s) with build dependencies",
            self.builder.project_configurations.len(),
            self.builder.build_dependencies.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphNode;
    use crate::visitor::{fold_events, TraversalEvent};
    use strata_core::metadata::ConfigurationMetadata;

    fn local(path: &str, configuration: &str, deps: &[&str]) -> GraphNode {
        GraphNode::new(
            ComponentIdentifier::project(path),
            configuration,
            ConfigurationMetadata::local(deps.iter().copied()),
        )
    }

    fn deps(actions: &[&str]) -> BTreeSet<BuildActionRef> {
        actions.iter().map(|a| BuildActionRef::new(*a)).collect()
    }

    #[test]
    fn project_configuration_resolved_is_idempotent() {
        let mut builder = ResolvedLocalComponentsBuilder::default();
        let b = ProjectComponentIdentifier::new(":b");
        builder.project_configuration_resolved(&b, "api");
        builder.project_configuration_resolved(&b, "api");
        let result = builder.complete();
        assert_eq!(result.configurations_of(&b).map(|c| c.len()), Some(1));
    }

    #[test]
    fn empty_build_dependencies_leave_no_entry() {
        let mut builder = ResolvedLocalComponentsBuilder::default();
        builder.local_component_resolved(&ComponentIdentifier::project(":b"), &BTreeSet::new());
        assert!(builder.complete().is_empty());
    }

    #[test]
    fn build_dependencies_are_unioned() {
        let mut builder = ResolvedLocalComponentsBuilder::default();
        let b = ComponentIdentifier::project(":b");
        builder.local_component_resolved(&b, &deps(&[":b:jar"]));
        builder.local_component_resolved(&b, &deps(&[":b:jar", ":b:classes"]));
        let result = builder.complete();
        assert_eq!(result.build_dependencies_of(&b), Some(&deps(&[":b:classes", ":b:jar"])));
    }

    #[test]
    fn disabled_project_dependencies_skip_build_actions() {
        let mut builder = ResolvedLocalComponentsBuilder::new(false);
        let b = ProjectComponentIdentifier::new(":b");
        builder.project_configuration_resolved(&b, "api");
        builder.local_component_resolved(&b.clone().into(), &deps(&[":b:jar"]));
        let result = builder.complete();
        assert!(result.build_dependencies().is_empty());
        assert_eq!(result.build_ordering_paths(), vec![":b:api"]);
    }

    #[test]
    fn only_the_literal_root_is_exempt() {
        let root = local(":a", "default", &[":a:jar"]);
        let twin = root.clone();
        let r = NodeRef::new(NodeIndex::new(0), &root);
        let t = NodeRef::new(NodeIndex::new(5), &twin);

        let mut visitor = ResolvedLocalComponentsVisitor::new(Default::default());
        fold_events(
            [
                TraversalEvent::Start(r),
                TraversalEvent::NodeVisited(r),
                TraversalEvent::NodeVisited(t),
                TraversalEvent::Finish(r),
            ],
            &mut visitor,
        )
        .unwrap();
        let result = visitor.complete().unwrap();
        assert!(result.project_configurations().is_empty());
        assert_eq!(
            result.build_dependencies_of(&ComponentIdentifier::project(":a")),
            Some(&deps(&[":a:jar"]))
        );
    }

    #[test]
    fn complete_before_finish_fails() {
        let visitor = ResolvedLocalComponentsVisitor::new(Default::default());
        assert!(visitor.complete().is_err());
    }

    #[test]
    fn finish_with_other_node_fails() {
        let root = local(":a", "default", &[]);
        let other = local(":b", "api", &[]);
        let mut visitor = ResolvedLocalComponentsVisitor::new(Default::default());
        visitor.start(NodeRef::new(NodeIndex::new(0), &root)).unwrap();
        let err = visitor
            .finish(NodeRef::new(NodeIndex::new(1), &other))
            .unwrap_err();
        assert!(err.to_string().contains("not the root node"), "got: {err}");
    }
}
