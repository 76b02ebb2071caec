//! Traversal protocol between the resolution engine and graph consumers.
//!
//! The engine drives every visitor through the same lifecycle:
//! `start(root)` once, then `visit_node` once per distinct node (root
//! included) interleaved with `visit_edge` once per edge, then
//! `finish(root)` once. Non-root nodes arrive in no particular order.
//!
//! The same lifecycle is available as a sequence of [`TraversalEvent`]s,
//! which [`fold_events`] replays into a visitor.

use petgraph::graph::NodeIndex;
use strata_core::component::ComponentIdentifier;
use strata_core::metadata::ConfigurationMetadata;
use strata_util::errors::StrataError;

use crate::graph::GraphNode;

/// A node handed to a visitor: its position in the graph plus its data.
///
/// Two `NodeRef`s denote the same node iff their indices are equal, even if
/// the node data compares equal.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub index: NodeIndex,
    pub node: &'a GraphNode,
}

impl<'a> NodeRef<'a> {
    pub fn new(index: NodeIndex, node: &'a GraphNode) -> Self {
        Self { index, node }
    }

    pub fn owner(&self) -> &'a ComponentIdentifier {
        &self.node.component
    }

    pub fn configuration(&self) -> &'a str {
        &self.node.configuration
    }

    pub fn metadata(&self) -> &'a ConfigurationMetadata {
        &self.node.metadata
    }
}

/// One step of a traversal.
#[derive(Debug, Clone, Copy)]
pub enum TraversalEvent<'a> {
    Start(NodeRef<'a>),
    NodeVisited(NodeRef<'a>),
    /// An edge terminating at the carried node.
    EdgeVisited(NodeRef<'a>),
    Finish(NodeRef<'a>),
}

/// Consumer of a resolution graph traversal.
///
/// Any error aborts the traversal; the engine discards everything the
/// visitor accumulated.
pub trait DependencyGraphVisitor {
    fn start(&mut self, root: NodeRef<'_>) -> Result<(), StrataError>;

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), StrataError>;

    fn visit_edge(&mut self, _node: NodeRef<'_>) -> Result<(), StrataError> {
        Ok(())
    }

    fn finish(&mut self, _root: NodeRef<'_>) -> Result<(), StrataError> {
        Ok(())
    }
}

/// Replay `events` into `visitor`, stopping at the first failure.
pub fn fold_events<'a, I, V>(events: I, visitor: &mut V) -> Result<(), StrataError>
where
    I: IntoIterator<Item = TraversalEvent<'a>>,
    V: DependencyGraphVisitor + ?Sized,
{
    for event in events {
        match event {
            TraversalEvent::Start(root) => visitor.start(root)?,
            TraversalEvent::NodeVisited(node) => visitor.visit_node(node)?,
            TraversalEvent::EdgeVisited(node) => visitor.visit_edge(node)?,
            TraversalEvent::Finish(root) => visitor.finish(root)?,
        }
    }
    Ok(())
}

/// Fans one traversal out to several visitors, in registration order.
#[derive(Default)]
pub struct CompositeVisitor<'v> {
    visitors: Vec<&'v mut dyn DependencyGraphVisitor>,
}

impl<'v> CompositeVisitor<'v> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, visitor: &'v mut dyn DependencyGraphVisitor) {
        self.visitors.push(visitor);
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl DependencyGraphVisitor for CompositeVisitor<'_> {
    fn start(&mut self, root: NodeRef<'_>) -> Result<(), StrataError> {
        self.visitors.iter_mut().try_for_each(|v| v.start(root))
    }

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), StrataError> {
        self.visitors.iter_mut().try_for_each(|v| v.visit_node(node))
    }

    fn visit_edge(&mut self, node: NodeRef<'_>) -> Result<(), StrataError> {
        self.visitors.iter_mut().try_for_each(|v| v.visit_edge(node))
    }

    fn finish(&mut self, root: NodeRef<'_>) -> Result<(), StrataError> {
        self.visitors.iter_mut().try_for_each(|v| v.finish(root))
    }
}
