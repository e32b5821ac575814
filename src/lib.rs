//! `ledgraph`: a generic, concurrency-safe graph library parametrized over a
//! totally-ordered key type `K` and an opaque value type `T`, with algorithms
//! for traversal, shortest paths, spanning trees, topology, and centrality.
//!
//! Graphs come in two trait-dispatched flavors, [`DirectedGraph`] and
//! [`UndirectedGraph`], both implementing the shared [`Graph`] contract.
//! Mutation and enumeration are concurrency-safe by construction: every
//! operation goes through a single [`ledger::Ledger`] guarded by one
//! read/write-exclusion lock per graph.

pub mod cycle;
pub mod error;
pub mod graph;
pub mod io;
pub mod ledger;
pub mod mst;
pub mod metrics;
pub mod paths;
pub mod primitives;
pub mod queue;
pub mod streaming;
pub mod topology;
pub mod traversal;

pub use error::{GraphError, Result};
pub use graph::{DirectedGraph, Graph, UndirectedGraph};
pub use primitives::{Edge, EdgeOption, Key, Properties, Traits, Value, Vertex, VertexOption};

/// The trivial `T -> K` hash function for the common case `T == K`: callers
/// whose vertex value already doubles as its own unique id can pass this
/// directly to `Graph::new` instead of writing a one-line closure (§6: "any
/// such function", §11).
pub fn identity<K: Clone>(k: &K) -> K {
    k.clone()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_hash_returns_its_input() {
        assert_eq!(identity(&42u64), 42u64);
    }
}
