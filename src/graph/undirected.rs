//! Undirected graph: stores each logical edge twice in the ledger (as
//! `(s,t)` and `(t,s)`), with cloned properties, and tracks which
//! orientation was inserted first so `edges()` can report one direction per
//! logical edge deterministically (§4.4).

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::GraphError;
use crate::ledger::Ledger;
use crate::primitives::{Edge, EdgeOption, Key, Traits, Value, Vertex, VertexOption, VertexProperties};

use super::Graph;

fn sorted_pair<K: Key>(a: &K, b: &K) -> (K, K) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

pub struct UndirectedGraph<K: Key, T: Value> {
    ledger: Ledger<K, T>,
    traits: Traits,
    hash: Arc<dyn Fn(&T) -> K + Send + Sync>,
    /// Sorted-pair key -> orientation as first inserted. This is the "one
    /// orientation per logical edge" bookkeeping §4.4 calls for; the ledger
    /// itself is fully symmetric and has no notion of which side came first.
    canonical: RwLock<BTreeMap<(K, K), (K, K)>>,
}

impl<K: Key, T: Value> UndirectedGraph<K, T> {
    /// Inserts both orientations of `e` as one logical step.
    ///
    /// §9 Open Question 1: the ledger inserts `(s,t)` first and `(t,s)`
    /// immediately after; under the invariants the second insertion cannot
    /// fail once the first succeeded (same two vertices, and the reverse
    /// pair is checked for absence up front), so the two-step sequence is
    /// not truly atomic but cannot observably fail halfway in practice.
    fn mirror_add(&self, e: Edge<K>) -> Result<(), GraphError<K>> {
        if self.ledger.find_edge(&e.target, &e.source).is_ok() {
            return Err(GraphError::EdgeAlreadyExists(e.source, e.target));
        }
        let rev = e.reversed();
        self.ledger.add_edge(e.clone())?;
        self.ledger.add_edge(rev)?;
        let key = sorted_pair(&e.source, &e.target);
        self.canonical.write().insert(key, (e.source, e.target));
        Ok(())
    }

    fn mirror_remove(&self, s: &K, t: &K) -> Result<(), GraphError<K>> {
        let (s, t) = match self.ledger.find_edge(s, t) {
            Ok(_) => (s.clone(), t.clone()),
            Err(_) => (t.clone(), s.clone()),
        };
        self.ledger.remove_edge(&s, &t)?;
        self.ledger.remove_edge(&t, &s)?;
        self.canonical.write().remove(&sorted_pair(&s, &t));
        Ok(())
    }
}

impl<K: Key, T: Value> Graph<K, T> for UndirectedGraph<K, T> {
    fn new(hash: impl Fn(&T) -> K + Send + Sync + 'static, traits: Traits) -> Self {
        let mut traits = traits;
        traits.is_directed = false;
        Self {
            ledger: Ledger::new(),
            traits,
            hash: Arc::new(hash),
            canonical: RwLock::new(BTreeMap::new()),
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
        self.canonical
            .read()
            .values()
            .filter_map(|(s, t)| self.ledger.find_edge(s, t).ok())
            .collect()
    }

    fn add_edge(&self, e: Edge<K>) -> Result<(), GraphError<K>> {
        if self.traits.prevent_cycles {
            if self.ledger.would_create_cycle(&e.source, &e.target)? {
                log::warn!("undirected graph: rejecting edge, would create a cycle");
                return Err(GraphError::EdgeCreatesCycle(e.source, e.target));
            }
        }
        self.mirror_add(e)
    }

    fn add_edge_with_options(&self, s: K, t: K, opts: &[EdgeOption]) -> Result<(), GraphError<K>> {
        let mut e = Edge::new(s, t);
        for opt in opts {
            opt.apply(&mut e.props);
        }
        self.add_edge(e)
    }

    fn edge(&self, s: &K, t: &K) -> Result<Edge<K>, GraphError<K>> {
        self.ledger.find_edge(s, t).or_else(|_| self.ledger.find_edge(t, s))
    }

    fn set_edge_with_options(&self, s: &K, t: &K, opts: &[EdgeOption]) -> Result<(), GraphError<K>> {
        let mut e = self.edge(s, t)?;
        for opt in opts {
            opt.apply(&mut e.props);
        }
        self.ledger.modify_edge(&e.source, &e.target, e.props.clone())?;
        self.ledger.modify_edge(&e.target, &e.source, e.props)
    }

    fn remove_edge(&self, s: &K, t: &K) -> Result<(), GraphError<K>> {
        self.mirror_remove(s, t)
    }

    fn has_edge(&self, s: &K, t: &K) -> Result<bool, GraphError<K>> {
        Ok(self.ledger.find_edge(s, t).is_ok() || self.ledger.find_edge(t, s).is_ok())
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
            clone.mirror_add(e).expect("cloning a consistent graph cannot fail");
        }
        clone
    }

    fn empty_like(&self) -> Self {
        Self {
            ledger: Ledger::new(),
            traits: self.traits,
            hash: self.hash.clone(),
            canonical: RwLock::new(BTreeMap::new()),
        }
    }

    fn order(&self) -> usize {
        self.ledger.count_vertices()
    }

    /// Internal edge count is exactly `2 * size()` (§8); external size is
    /// the logical edge count.
    fn size(&self) -> usize {
        self.ledger.count_edges() / 2
    }

    fn neighbors(&self, k: &K) -> Result<Vec<K>, GraphError<K>> {
        if !self.has_vertex(k)? {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        Ok(self.ledger.successors().remove(k).unwrap_or_default().into_keys().collect())
    }

    fn degree(&self, k: &K) -> Result<usize, GraphError<K>> {
        self.out_degree(k)
    }

    fn in_degree(&self, k: &K) -> Result<usize, GraphError<K>> {
        self.out_degree(k)
    }

    fn out_degree(&self, k: &K) -> Result<usize, GraphError<K>> {
        if !self.has_vertex(k)? {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        Ok(self.ledger.successors().get(k).map_or(0, |m| m.len()))
    }
}
