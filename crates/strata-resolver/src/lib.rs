//! Resolution result extraction: walks a finalized resolution graph and
//! derives the project configurations it consumes (for build ordering) and
//! the build actions those configurations need (for build action selection).

pub mod builder;
pub mod graph;
pub mod result;
pub mod visitor;

use strata_core::config::ResolutionConfig;
use strata_util::errors::StrataError;

use crate::builder::{ResolvedLocalComponentsBuilder, ResolvedLocalComponentsVisitor};
use crate::graph::ResolutionGraph;
use crate::result::ResolvedLocalComponents;

/// Traverse `graph` once and return its resolved local components.
///
/// Any traversal failure discards the partial result.
pub fn resolve_local_components(
    graph: &ResolutionGraph,
    config: &ResolutionConfig,
) -> Result<ResolvedLocalComponents, StrataError> {
    let _span = tracing::debug_span!("resolve_local_components", nodes = graph.len()).entered();
    let mut visitor =
        ResolvedLocalComponentsVisitor::new(ResolvedLocalComponentsBuilder::from_config(config));
    graph.traverse(&mut visitor)?;
    visitor.complete()
}
