//! The concurrency-safe in-memory store underlying every graph variant
//! (§4.2). The ledger always stores a *directed* view — `out_edges`/
//! `in_edges` keyed by source/target respectively — and leaves mirroring for
//! undirected semantics to the graph layer (§4.4).

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::GraphError;
use crate::primitives::{Edge, EdgeProperties, Key, Value, VertexProperties};

struct LedgerState<K, T> {
    vertices: BTreeMap<K, T>,
    vertex_props: BTreeMap<K, VertexProperties>,
    out_edges: BTreeMap<K, BTreeMap<K, Edge<K>>>,
    in_edges: BTreeMap<K, BTreeMap<K, Edge<K>>>,
    edge_count: usize,
}

impl<K: Key, T: Value> LedgerState<K, T> {
    fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            vertex_props: BTreeMap::new(),
            out_edges: BTreeMap::new(),
            in_edges: BTreeMap::new(),
            edge_count: 0,
        }
    }
}

/// Atomic vertex/edge storage behind a single read/write-exclusion lock
/// (§5). Readers may run concurrently; writers are exclusive. Every method
/// acquires its guard, does its work, and releases on every exit path —
/// none return while holding the lock.
pub struct Ledger<K, T> {
    state: RwLock<LedgerState<K, T>>,
}

impl<K: Key, T: Value> Default for Ledger<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, T: Value> Ledger<K, T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::new()),
        }
    }

    pub fn add_vertex(&self, k: K, value: T, props: VertexProperties) -> Result<(), GraphError<K>> {
        let mut state = self.state.write();
        if state.vertices.contains_key(&k) {
            return Err(GraphError::VertexAlreadyExists(k));
        }
        log::debug!("ledger: adding vertex");
        state.vertices.insert(k.clone(), value);
        state.vertex_props.insert(k.clone(), props);
        state.out_edges.entry(k.clone()).or_default();
        state.in_edges.entry(k).or_default();
        Ok(())
    }

    pub fn find_vertex(&self, k: &K) -> Result<(T, VertexProperties), GraphError<K>> {
        let state = self.state.read();
        let value = state
            .vertices
            .get(k)
            .cloned()
            .ok_or_else(|| GraphError::VertexNotFound(k.clone()))?;
        let props = state.vertex_props.get(k).cloned().unwrap_or_default();
        Ok((value, props))
    }

    pub fn modify_vertex(&self, k: &K, props: VertexProperties) -> Result<(), GraphError<K>> {
        let mut state = self.state.write();
        if !state.vertices.contains_key(k) {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        state.vertex_props.insert(k.clone(), props);
        Ok(())
    }

    pub fn remove_vertex(&self, k: &K) -> Result<(), GraphError<K>> {
        let mut state = self.state.write();
        if !state.vertices.contains_key(k) {
            return Err(GraphError::VertexNotFound(k.clone()));
        }
        let has_out = state.out_edges.get(k).map_or(false, |m| !m.is_empty());
        let has_in = state.in_edges.get(k).map_or(false, |m| !m.is_empty());
        if has_out || has_in {
            log::warn!("ledger: rejecting vertex removal, vertex still has edges");
            return Err(GraphError::VertexHasEdges(k.clone()));
        }
        log::debug!("ledger: removing vertex");
        state.vertices.remove(k);
        state.vertex_props.remove(k);
        state.out_edges.remove(k);
        state.in_edges.remove(k);
        Ok(())
    }

    /// Keys in ascending order by `K`'s total order — a contract, not an
    /// implementation detail (§4.2).
    pub fn list_vertices(&self) -> Vec<K> {
        self.state.read().vertices.keys().cloned().collect()
    }

    pub fn count_vertices(&self) -> usize {
        self.state.read().vertices.len()
    }

    pub fn add_edge(&self, e: Edge<K>) -> Result<(), GraphError<K>> {
        let mut state = self.state.write();
        if !state.vertices.contains_key(&e.source) {
            return Err(GraphError::VertexNotFound(e.source.clone()));
        }
        if !state.vertices.contains_key(&e.target) {
            return Err(GraphError::VertexNotFound(e.target.clone()));
        }
        if state
            .out_edges
            .get(&e.source)
            .map_or(false, |m| m.contains_key(&e.target))
        {
            return Err(GraphError::EdgeAlreadyExists(e.source, e.target));
        }
        log::debug!("ledger: adding edge");
        state
            .out_edges
            .entry(e.source.clone())
            .or_default()
            .insert(e.target.clone(), e.clone());
        state
            .in_edges
            .entry(e.target.clone())
            .or_default()
            .insert(e.source.clone(), e);
        state.edge_count += 1;
        Ok(())
    }

    pub fn find_edge(&self, s: &K, t: &K) -> Result<Edge<K>, GraphError<K>> {
        let state = self.state.read();
        state
            .out_edges
            .get(s)
            .and_then(|m| m.get(t))
            .cloned()
            .ok_or_else(|| GraphError::EdgeNotFound(s.clone(), t.clone()))
    }

    pub fn modify_edge(&self, s: &K, t: &K, props: EdgeProperties) -> Result<(), GraphError<K>> {
        let mut state = self.state.write();
        let existing = state
            .out_edges
            .get(s)
            .and_then(|m| m.get(t))
            .cloned()
            .ok_or_else(|| GraphError::EdgeNotFound(s.clone(), t.clone()))?;
        let mut updated = existing;
        updated.props = props.clone();
        state
            .out_edges
            .get_mut(s)
            .unwrap()
            .insert(t.clone(), updated.clone());
        state
            .in_edges
            .get_mut(t)
            .unwrap()
            .insert(s.clone(), updated);
        Ok(())
    }

    pub fn remove_edge(&self, s: &K, t: &K) -> Result<(), GraphError<K>> {
        let mut state = self.state.write();
        let removed = state
            .out_edges
            .get_mut(s)
            .and_then(|m| m.remove(t))
            .is_some();
        if !removed {
            return Err(GraphError::EdgeNotFound(s.clone(), t.clone()));
        }
        log::debug!("ledger: removing edge");
        state.in_edges.get_mut(t).unwrap().remove(s);
        state.edge_count -= 1;
        Ok(())
    }

    /// Edges sorted lexicographically by `(source, target)` — guaranteed by
    /// the `BTreeMap<K, BTreeMap<K, Edge<K>>>` storage shape, not a sort
    /// step tacked on afterward.
    pub fn list_edges(&self) -> Vec<Edge<K>> {
        let state = self.state.read();
        state
            .out_edges
            .values()
            .flat_map(|m| m.values().cloned())
            .collect()
    }

    pub fn count_edges(&self) -> usize {
        self.state.read().edge_count
    }

    /// Outgoing-adjacency snapshot keyed by every vertex (even orphans, since
    /// `add_vertex` seeds an empty entry for each) — the `AdjacencyMap`
    /// building block (§4.1, §4.3).
    pub fn successors(&self) -> BTreeMap<K, BTreeMap<K, Edge<K>>> {
        self.state.read().out_edges.clone()
    }

    /// Incoming-adjacency snapshot, symmetric to [`Ledger::successors`] — the
    /// `PredecessorMap` building block.
    pub fn predecessors(&self) -> BTreeMap<K, BTreeMap<K, Edge<K>>> {
        self.state.read().in_edges.clone()
    }

    /// Fast-path cycle probe (§4.2.1): `true` iff inserting `(s, t)` would
    /// close a directed cycle, i.e. iff `s` is reachable from `t` via
    /// forward edges, equivalently `t` is reachable from `s` via **incoming**
    /// edges. DFS over `in_edges` from `s`.
    pub fn would_create_cycle(&self, s: &K, t: &K) -> Result<bool, GraphError<K>> {
        let state = self.state.read();
        if !state.vertices.contains_key(s) {
            return Err(GraphError::VertexNotFound(s.clone()));
        }
        if !state.vertices.contains_key(t) {
            return Err(GraphError::VertexNotFound(t.clone()));
        }
        if s == t {
            return Ok(true);
        }
        let mut visited = std::collections::HashSet::new();
        let mut stack = vec![s.clone()];
        while let Some(u) = stack.pop() {
            if !visited.insert(u.clone()) {
                continue;
            }
            if u == *t {
                return Ok(true);
            }
            if let Some(preds) = state.in_edges.get(&u) {
                for pred in preds.keys() {
                    if !visited.contains(pred) {
                        stack.push(pred.clone());
                    }
                }
            }
        }
        Ok(false)
    }
}
