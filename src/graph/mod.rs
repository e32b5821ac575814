//! The `Graph` contract (§4.1) and its two trait-dispatched implementations.
//! Rather than a class hierarchy, both [`DirectedGraph`] and
//! [`UndirectedGraph`] are thin wrappers over a shared [`crate::ledger::Ledger`]
//! that differ only in how they mirror edges and account for size (§9,
//! "Trait-configured variants").

mod directed;
mod undirected;

pub use directed::DirectedGraph;
pub use undirected::UndirectedGraph;

use std::collections::BTreeMap;

use crate::error::GraphError;
use crate::primitives::{Edge, EdgeOption, Key, Traits, Value, Vertex, VertexOption};

/// Operations exposed by any graph, directed or undirected (§4.1). All
/// mutating and read operations are concurrency-safe (§5): implementations
/// delegate to a [`crate::ledger::Ledger`], which holds the single
/// read/write-exclusion lock.
pub trait Graph<K: Key, T: Value>: Sized {
    /// Hash function `T -> K` supplied at construction.
    fn new(hash: impl Fn(&T) -> K + Send + Sync + 'static, traits: Traits) -> Self;

    fn traits(&self) -> Traits;

    /// Applies this graph's hash function to `value`.
    fn hash_of(&self, value: &T) -> K;

    fn add_vertex(&self, v: Vertex<K, T>) -> Result<(), GraphError<K>>;

    /// Derives the id from `value` via the graph's hash function, applies
    /// `opts`, and inserts the vertex. Returns the derived id.
    fn add_vertex_with_options(&self, value: T, opts: &[VertexOption]) -> Result<K, GraphError<K>>;

    fn vertex(&self, k: &K) -> Result<Vertex<K, T>, GraphError<K>>;

    fn set_vertex_with_options(&self, value: T, opts: &[VertexOption]) -> Result<(), GraphError<K>>;

    fn has_vertex(&self, k: &K) -> Result<bool, GraphError<K>>;

    fn remove_vertex(&self, k: &K) -> Result<(), GraphError<K>>;

    fn vertices(&self) -> Vec<Vertex<K, T>>;

    /// For undirected graphs, each logical edge is listed once, in the
    /// direction it was first inserted.
    fn edges(&self) -> Vec<Edge<K>>;

    fn add_edge(&self, e: Edge<K>) -> Result<(), GraphError<K>>;

    fn add_edge_with_options(&self, s: K, t: K, opts: &[EdgeOption]) -> Result<(), GraphError<K>>;

    /// For undirected graphs, falls back to `(t, s)` if `(s, t)` is absent.
    fn edge(&self, s: &K, t: &K) -> Result<Edge<K>, GraphError<K>>;

    fn set_edge_with_options(&self, s: &K, t: &K, opts: &[EdgeOption]) -> Result<(), GraphError<K>>;

    fn remove_edge(&self, s: &K, t: &K) -> Result<(), GraphError<K>>;

    fn has_edge(&self, s: &K, t: &K) -> Result<bool, GraphError<K>>;

    /// Bulk import. Stops at the first error; already-applied partial state
    /// is left in place (Open Question 3) — `Clone` before attempting if
    /// that risk is unacceptable.
    fn add_vertices_from(&self, other: &Self) -> Result<(), GraphError<K>> {
        for v in other.vertices() {
            let id = v.id.clone();
            self.add_vertex(v)
                .map_err(|e| e.context(format!("failed to add vertex from import: {id:?}")))?;
        }
        Ok(())
    }

    fn add_edges_from(&self, other: &Self) -> Result<(), GraphError<K>> {
        for e in other.edges() {
            let (s, t) = (e.source.clone(), e.target.clone());
            self.add_edge(e)
                .map_err(|e| e.context(format!("failed to add edge from import: ({s:?}, {t:?})")))?;
        }
        Ok(())
    }

    /// `K -> (K -> Edge)`, every vertex present as a key even with an empty
    /// inner map.
    fn adjacency_map(&self) -> BTreeMap<K, BTreeMap<K, Edge<K>>>;

    /// Symmetric structure over incoming edges; equal to `adjacency_map` for
    /// undirected graphs.
    fn predecessor_map(&self) -> BTreeMap<K, BTreeMap<K, Edge<K>>>;

    /// Deep copy: fresh ledger, cloned traits, independent synchronization.
    fn deep_clone(&self) -> Self;

    /// A fresh, empty graph sharing this graph's traits (but no vertices or
    /// edges) — used by algorithms that build a result graph of the same
    /// shape (MST, transitive reduction).
    fn empty_like(&self) -> Self;

    fn order(&self) -> usize;

    fn size(&self) -> usize;

    fn neighbors(&self, k: &K) -> Result<Vec<K>, GraphError<K>>;

    fn degree(&self, k: &K) -> Result<usize, GraphError<K>>;

    fn in_degree(&self, k: &K) -> Result<usize, GraphError<K>>;

    fn out_degree(&self, k: &K) -> Result<usize, GraphError<K>>;
}
