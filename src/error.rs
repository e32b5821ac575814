//! Error taxonomy (§7). Every fallible operation in this crate returns a
//! [`GraphError`]; nothing is swallowed silently except two spots called out
//! explicitly in §4.12 (`MinPriorityQueue::push` on a duplicate item,
//! `MinPriorityQueue::set_priority` on an unknown one — both are no-ops by
//! contract, not errors).

use std::fmt;

use thiserror::Error;

/// Error kinds surfaced by graph operations, parametrized over the key type
/// so precondition violations can carry the offending key(s).
#[derive(Debug, Error)]
pub enum GraphError<K: fmt::Debug> {
    #[error("vertex not found: {0:?}")]
    VertexNotFound(K),
    #[error("vertex already exists: {0:?}")]
    VertexAlreadyExists(K),
    #[error("vertex still has edges: {0:?}")]
    VertexHasEdges(K),
    #[error("edge not found: ({0:?}, {1:?})")]
    EdgeNotFound(K, K),
    #[error("edge already exists: ({0:?}, {1:?})")]
    EdgeAlreadyExists(K, K),
    #[error("edge would create a cycle: ({0:?}, {1:?})")]
    EdgeCreatesCycle(K, K),
    #[error("source and target are the same vertex: {0:?}")]
    SameSourceAndTarget(K),
    #[error("input graph is nil")]
    NilInputGraph,
    #[error("graph type mismatch")]
    GraphTypeMismatch,
    #[error("limit out of range")]
    LimitOutOfRange,
    /// Operation requires a directed graph. Variant name matches the graph
    /// kind rejected by an operation that needs the *other* kind (so an
    /// operation requiring a directed graph rejects undirected input with
    /// this `UndirectedGraph` variant).
    #[error("operation requires a directed graph")]
    UndirectedGraph,
    /// Operation requires an undirected graph (see `UndirectedGraph` above
    /// for the naming convention).
    #[error("operation requires an undirected graph")]
    DirectedGraph,
    #[error("strongly connected component detection requires a directed graph")]
    SCCDetectionNotDirected,
    #[error("operation requires an acyclic graph")]
    CyclicGraph,
    #[error("target not reachable from source")]
    TargetNotReachable,
    #[error("negative-weight edge detected: ({0:?}, {1:?})")]
    NegativeWeightEdge(K, K),
    /// Catch-all for metric preconditions with no dedicated name in §7's
    /// taxonomy (an empty-edge graph fed to modularity, an invalid damping
    /// factor or iteration cap passed to PageRank, a zero-norm vector during
    /// eigenvector power iteration).
    #[error("{0}")]
    Other(String),
    /// Catch-all for the "internal failures" bucket described in §7
    /// (`AdjacencyMapFailure`, `PredecessorMapFailure`, `FailedToListVertices`,
    /// `FailedToListEdges`, `FailedToGetGraphOrder`, `FailedToCloneGraph`,
    /// `FailedToAdd*`, `FailedToRemove*`): a context string plus the wrapped
    /// root cause, so the chain survives `std::error::Error::source`.
    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<GraphError<K>>,
    },
}

impl<K: fmt::Debug> GraphError<K> {
    /// Wraps `self` with additional context, preserving the root cause chain.
    pub fn context(self, context: impl Into<String>) -> Self {
        GraphError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T, K> = std::result::Result<T, GraphError<K>>;
