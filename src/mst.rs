//! Kruskal minimum/maximum spanning tree with union–find (§4.8). Undirected
//! graphs only, enforced at compile time by taking [`UndirectedGraph`]
//! directly rather than the generic [`Graph`] trait — see the "wrong graph
//! kind" discussion in DESIGN.md for why [`GraphError::DirectedGraph`] still
//! exists in the taxonomy even though this function can never produce it.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::graph::{Graph, UndirectedGraph};
use crate::primitives::{Key, Value};

/// Parent-pointer union–find over `K`. `union` attaches `root(b)` under
/// `root(a)` with no rank heuristic (§4.8); `find` path-compresses in a
/// second pass so every visited node ends up pointing directly at the root.
struct UnionFind<K: Key> {
    parent: HashMap<K, K>,
}

impl<K: Key> UnionFind<K> {
    fn new(keys: impl IntoIterator<Item = K>) -> Self {
        let parent = keys.into_iter().map(|k| (k.clone(), k)).collect();
        Self { parent }
    }

    fn find(&mut self, k: &K) -> K {
        let mut root = k.clone();
        while self.parent[&root] != root {
            root = self.parent[&root].clone();
        }
        let mut cur = k.clone();
        while self.parent[&cur] != cur {
            let next = self.parent[&cur].clone();
            self.parent.insert(cur, root.clone());
            cur = next;
        }
        root
    }

    fn union(&mut self, a: &K, b: &K) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent.insert(rb, ra);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanningKind {
    Minimum,
    Maximum,
}

/// Kruskal's algorithm (§4.8). Flattens the adjacency snapshot (each logical
/// edge appears twice, once per mirrored orientation; harmless, since the
/// second orientation's endpoints are already unioned and gets skipped),
/// sorts by weight, and unions components greedily. Returns a minimum
/// spanning forest when `g` is disconnected.
pub fn spanning_tree<K: Key, T: Value>(
    g: &UndirectedGraph<K, T>,
    kind: SpanningKind,
) -> Result<UndirectedGraph<K, T>, GraphError<K>> {
    let result = g.empty_like();
    for v in g.vertices() {
        result.add_vertex(v).expect("empty_like target cannot collide");
    }

    let mut uf = UnionFind::new(g.vertices().into_iter().map(|v| v.id));
    let mut edges: Vec<_> = g.adjacency_map().into_values().flat_map(|m| m.into_values()).collect();
    match kind {
        SpanningKind::Minimum => edges.sort_by(|a, b| a.props.weight.partial_cmp(&b.props.weight).unwrap()),
        SpanningKind::Maximum => edges.sort_by(|a, b| b.props.weight.partial_cmp(&a.props.weight).unwrap()),
    }

    for edge in edges {
        let (ra, rb) = (uf.find(&edge.source), uf.find(&edge.target));
        if ra != rb {
            uf.union(&edge.source, &edge.target);
            log::trace!("kruskal: unioning components via edge");
            result.add_edge(edge).expect("endpoints were copied from the source graph");
        }
    }
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitives::{EdgeOption, Traits};

    #[test]
    fn diamond_minimum_spanning_tree_scenario() {
        // §8 scenario 4: A-B:1, B-C:2, A-C:2, C-D:3, A-D:5 -> {A-B,B-C,C-D}, weight 6.
        let g = UndirectedGraph::new(|v: &char| *v, Traits::new());
        for k in ['A', 'B', 'C', 'D'] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options('A', 'B', &[EdgeOption::Weight(1.0)]).unwrap();
        g.add_edge_with_options('B', 'C', &[EdgeOption::Weight(2.0)]).unwrap();
        g.add_edge_with_options('A', 'C', &[EdgeOption::Weight(2.0)]).unwrap();
        g.add_edge_with_options('C', 'D', &[EdgeOption::Weight(3.0)]).unwrap();
        g.add_edge_with_options('A', 'D', &[EdgeOption::Weight(5.0)]).unwrap();

        let mst = spanning_tree(&g, SpanningKind::Minimum).unwrap();
        assert_eq!(mst.order(), 4);
        assert_eq!(mst.size(), 3);
        let total: f64 = mst.edges().iter().map(|e| e.props.weight).sum();
        assert_eq!(total, 6.0);
        assert!(mst.has_edge(&'A', &'B').unwrap());
        assert!(mst.has_edge(&'B', &'C').unwrap());
        assert!(mst.has_edge(&'C', &'D').unwrap());
    }

    #[test]
    fn disconnected_graph_yields_a_forest() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3, 4] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[EdgeOption::Weight(1.0)]).unwrap();
        g.add_edge_with_options(3, 4, &[EdgeOption::Weight(1.0)]).unwrap();
        let forest = spanning_tree(&g, SpanningKind::Minimum).unwrap();
        assert_eq!(forest.size(), 2);
    }
}
