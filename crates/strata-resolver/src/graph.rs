//! Resolution graph of selected (component, configuration) nodes.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use strata_core::component::ComponentIdentifier;
use strata_core::metadata::ConfigurationMetadata;
use strata_util::errors::StrataError;

use crate::visitor::{fold_events, DependencyGraphVisitor, NodeRef, TraversalEvent};

/// A selected configuration of a component, after conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub component: ComponentIdentifier,
    pub configuration: String,
    pub metadata: ConfigurationMetadata,
}

impl GraphNode {
    pub fn new(
        component: ComponentIdentifier,
        configuration: impl Into<String>,
        metadata: ConfigurationMetadata,
    ) -> Self {
        Self {
            component,
            configuration: configuration.into(),
            metadata,
        }
    }

    /// `(component, configuration)` key; unique within a graph.
    pub fn key(&self) -> (ComponentIdentifier, String) {
        (self.component.clone(), self.configuration.clone())
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.component, self.configuration)
    }
}

/// A finalized resolution graph backed by petgraph.
///
/// Edges point from the consumer to the dependency.
pub struct ResolutionGraph {
    graph: DiGraph<GraphNode, ()>,
    index: HashMap<(ComponentIdentifier, String), NodeIndex>,
    root: Option<NodeIndex>,
}

impl ResolutionGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Add or retrieve a node. If the key already exists, returns the existing index.
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let key = node.key();
        if let Some(&idx) = self.index.get(&key) {
            if self.graph[idx].metadata != node.metadata {
                tracing::warn!("Ignoring conflicting metadata for already selected node {node}");
            }
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Set the root node of the graph (the configuration being resolved).
    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Add a dependency edge from consumer `from` to dependency `to`.
    ///
    /// Both endpoints must already be in the graph.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<(), StrataError> {
        self.node(from)?;
        self.node(to)?;
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
        Ok(())
    }

    /// Look up a node by component and configuration name.
    pub fn find(&self, component: &ComponentIdentifier, configuration: &str) -> Option<NodeIndex> {
        self.index
            .get(&(component.clone(), configuration.to_string()))
            .copied()
    }

    /// Get the node data for an index.
    pub fn node(&self, idx: NodeIndex) -> Result<&GraphNode, StrataError> {
        self.graph
            .node_weight(idx)
            .ok_or(StrataError::MissingNode {
                index: idx.index(),
            })
    }

    /// Direct dependencies of a node.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect()
    }

    /// Lazily produce the traversal events for this graph.
    ///
    /// Fails when no root has been set or the root is not in the graph.
    pub fn events(&self) -> Result<Traversal<'_>, StrataError> {
        let root = self
            .root
            .ok_or_else(|| StrataError::traversal("resolution graph has no root node"))?;
        self.node(root)?;
        Ok(Traversal {
            graph: self,
            root,
            queue: VecDeque::new(),
            seen: HashSet::new(),
            pending: VecDeque::new(),
            state: TraversalState::NotStarted,
        })
    }

    /// Drive `visitor` through one complete traversal of the graph.
    pub fn traverse<V>(&self, visitor: &mut V) -> Result<(), StrataError>
    where
        V: DependencyGraphVisitor + ?Sized,
    {
        fold_events(self.events()?, visitor)
    }

    fn node_ref(&self, idx: NodeIndex) -> NodeRef<'_> {
        NodeRef::new(idx, &self.graph[idx])
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResolutionGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraversalState {
    NotStarted,
    Running,
    Finished,
}

/// Breadth-first event sequence over the nodes reachable from the root.
///
/// Yields `Start`, then each reachable node once followed by one
/// `EdgeVisited` per outgoing edge (carrying the edge's target), then `Finish`.
pub struct Traversal<'g> {
    graph: &'g ResolutionGraph,
    root: NodeIndex,
    queue: VecDeque<NodeIndex>,
    seen: HashSet<NodeIndex>,
    pending: VecDeque<TraversalEvent<'g>>,
    state: TraversalState,
}

impl<'g> Iterator for Traversal<'g> {
    type Item = TraversalEvent<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            match self.state {
                TraversalState::NotStarted => {
                    self.state = TraversalState::Running;
                    self.seen.insert(self.root);
                    self.queue.push_back(self.root);
                    return Some(TraversalEvent::Start(self.graph.node_ref(self.root)));
                }
                TraversalState::Running => {
                    let Some(idx) = self.queue.pop_front() else {
                        self.state = TraversalState::Finished;
                        return Some(TraversalEvent::Finish(self.graph.node_ref(self.root)));
                    };
                    self.pending
                        .push_back(TraversalEvent::NodeVisited(self.graph.node_ref(idx)));
                    for target in self.graph.dependencies_of(idx) {
                        self.pending
                            .push_back(TraversalEvent::EdgeVisited(self.graph.node_ref(target)));
                        if self.seen.insert(target) {
                            self.queue.push_back(target);
                        }
                    }
                }
                TraversalState::Finished => return None,
            }
        }
    }
}
