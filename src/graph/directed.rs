//! Directed graph: the ledger's natural orientation, plus trait enforcement
//! and cycle prevention on edge insertion (§4.3).

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::GraphError;
use crate::ledger::Ledger;
use crate::primitives::{Edge, EdgeOption, Key, Traits, Value, Vertex, VertexOption, VertexProperties};

use super::Graph;

/// Directed graph over a [`Ledger`]. Whether edge insertion rejects
/// cycle-creating edges is controlled by `traits.prevent_cycles` (§4.5): the
/// ledger's `would_create_cycle` fast path is used when the graph is
/// directed, which it always is here, so the fallback DFS in
/// [`crate::cycle`] is effectively only exercised by the undirected variant
/// or by direct callers.
pub struct DirectedGraph<K: Key, T: Value> {
    ledger: Ledger<K, T>,
    traits: Traits,
    hash: Arc<dyn Fn(&T) -> K + Send + Sync>,
}

impl<K: Key, T: Value> Graph<K, T> for DirectedGraph<K, T> {
    fn new(hash: impl Fn(&T) -> K + Send + Sync + 'static, traits: Traits) -> Self {
        Self {
            ledger: Ledger::new(),
            traits: traits.directed(),
            hash: Arc::new(hash),
        }
    }

    fn traits(&self) -> Traits {
        self.traits
    }

    fn hash_of(&self, value: &T) -> K {
        (self.hash)(value)
    }

    fn add_vertex(&self, v: Vertex<K, T>) -> Result<(), GraphError<K>> {
        self.ledger.add_vertex(v.id, v.value, v.props)
    }

    fn add_vertex_with_options(&self, value: T, opts: &[VertexOption]) -> Result<K, GraphError<K>> {
        let id = self.hash_of(&value);
        let mut props = VertexProperties::default();
        for opt in opts {
            opt.apply(&mut props);
        }
        self.ledger.add_vertex(id.clone(), value, props)?;
        Ok(id)
    }

    fn vertex(&self, k: &K) -> Result<Vertex<K, T>, GraphError<K>> {
        let (value, props) = self.ledger.find_vertex(k)?;
        Ok(Vertex {
            id: k.clone(),
            value,
            props,
        })
    }

    fn set_vertex_with_options(&self, value: T, opts: &[VertexOption]) -> Result<(), GraphError<K>> {
        let id = self.hash_of(&value);
        let (_, mut props) = self.ledger.find_vertex(&id)?;
        for opt in opts {
            opt.apply(&mut props);
        }
        self.ledger.modify_vertex(&id, props)
    }

    fn has_vertex(&self, k: &K) -> Result<bool, GraphError<K>> {
        match self.ledger.find_vertex(k) {
            Ok(_) => Ok(true),
            Err(GraphError::VertexNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn remove_vertex(&self, k: &K) -> Result<(), GraphError<K>> {
        self.ledger.remove_vertex(k)
    }

    fn vertices(&self) -> Vec<Vertex<K, T>> {
        self.ledger
            .list_vertices()
            .into_iter()
            .filter_map(|k| {
                self.ledger.find_vertex(&k).ok().map(|(value, props)| Vertex {
                    id: k,
                    value,
                    props,
                })
            })
            .collect()
    }

    fn edges(&self) -> Vec<Edge<K>> {
        self.ledger.list_edges()
    }

    fn add_edge(&self, e: Edge<K>) -> Result<(), GraphError<K>> {
        if self.traits.prevent_cycles {
            if self.ledger.would_create_cycle(&e.source, &e.target)? {
                log::warn!("directed graph: rejecting edge, would create a cycle");
                return Err(GraphError::EdgeCreatesCycle(e.source, e.target));
            }
        }
        self.ledger.add_edge(e)
    }

    fn add_edge_with_options(&self, s: K, t: K, opts: &[EdgeOption]) -> Result<(), GraphError<K>> {
        let mut e = Edge::new(s, t);
        for opt in opts {
            opt.apply(&mut e.props);
        }
        self.add_edge(e)
    }

    fn edge(&self, s: &K, t: &K) -> Result<Edge<K>, GraphError<K>> {
        self.ledger.find_edge(s, t)
    }

    fn set_edge_with_options(&self, s: &K, t: &K, opts: &[EdgeOption]) -> Result<(), GraphError<K>> {
        let mut e = self.ledger.find_edge(s, t)?;
        for opt in opts {
            opt.apply(&mut e.props);
        }
        self.ledger.modify_edge(s, t, e.props)
    }

    fn remove_edge(&self, s: &K, t: &K) -> Result<(), GraphError<K>> {
        self.ledger.remove_edge(s, t)
    }

    fn has_edge(&self, s: &K, t: &K) -> Result<bool, GraphError<K>> {
        match self.ledger.find_edge(s, t) {
            Ok(_) => Ok(true),
            Err(GraphError::EdgeNotFound(..)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn adjacency_map(&self) -> BTreeMap<K, BTreeMap<K, Edge<K>>> {
        self.ledger.successors()
    }

    fn predecessor_map(&self) -> BTreeMap<K, BTreeMap<K, Edge<K>>> {
        self.ledger.predecessors()
    }

    fn deep_clone(&self) -> Self {
        let clone = self.empty_like();
        for v in self.vertices() {
            clone.add_vertex(v).expect("cloning a consistent graph cannot fail");
        }
        for e in self.edges() {
            clone.ledger.add_edge(e).expect("cloning a consistent graph cannot fail");
        }
        clone
    }

    fn empty_like(&self) -> Self {
        Self {
            ledger: Ledger::new(),
            traits: self.traits,
            hash: self.hash.clone(),
        }
    }

    fn order(&self) -> usize {
        self.ledger.count_vertices()
    }

    fn size(&self) -> usize {
        self.ledger.count_edges()
    }

    fn neighbors(&self, k: &K) -> Result<Vec<K>, GraphError<K>> {
        if !self.has_vertex(k)? {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        Ok(self.ledger.successors().remove(k).unwrap_or_default().into_keys().collect())
    }

    fn degree(&self, k: &K) -> Result<usize, GraphError<K>> {
        Ok(self.in_degree(k)? + self.out_degree(k)?)
    }

    fn in_degree(&self, k: &K) -> Result<usize, GraphError<K>> {
        if !self.has_vertex(k)? {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        Ok(self.ledger.predecessors().get(k).map_or(0, |m| m.len()))
    }

    fn out_degree(&self, k: &K) -> Result<usize, GraphError<K>> {
        if !self.has_vertex(k)? {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        Ok(self.ledger.successors().get(k).map_or(0, |m| m.len()))
    }
}
