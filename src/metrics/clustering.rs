//! Clustering coefficients and transitivity (§4.10).

use std::collections::BTreeMap;

use crate::graph::Graph;
use crate::primitives::{Key, Value};

/// Per-vertex clustering coefficient. Undirected: `C(v) = 2e(N(v)) /
/// (k(k-1))`; directed iterates out-neighbors only, `C(v) = e / (k(k-1))`
/// (no factor of 2). Both reduce to the same ordered-pair count over the
/// adjacency map (undirected adjacency already mirrors each edge, which
/// supplies the factor of 2 for free). `C(v) = 0` for `k < 2`.
pub fn clustering_coefficient<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> BTreeMap<K, f64> {
    let adj = g.adjacency_map();
    let mut result = BTreeMap::new();
    for v in g.vertices() {
        let neighbors: Vec<K> = adj.get(&v.id).map(|m| m.keys().cloned().collect()).unwrap_or_default();
        let k = neighbors.len();
        if k < 2 {
            result.insert(v.id, 0.0);
            continue;
        }
        let mut edges_among_neighbors = 0usize;
        for a in &neighbors {
            for b in &neighbors {
                if a != b && adj.get(a).map_or(false, |m| m.contains_key(b)) {
                    edges_among_neighbors += 1;
                }
            }
        }
        result.insert(v.id, edges_among_neighbors as f64 / (k * (k - 1)) as f64);
    }
    result
}

/// Ratio of closed neighbor-triples to all neighbor-triples, iterating per
/// vertex (§4.10). Directed closure checks both directions between the pair
/// — the one place directed adjacency is treated symmetrically (see Open
/// Question 5 in DESIGN.md).
pub fn global_clustering_coefficient<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> f64 {
    let adj = g.adjacency_map();
    let mut closed = 0usize;
    let mut total = 0usize;
    for v in g.vertices() {
        let neighbors: Vec<K> = adj.get(&v.id).map(|m| m.keys().cloned().collect()).unwrap_or_default();
        let k = neighbors.len();
        if k < 2 {
            continue;
        }
        for i in 0..k {
            for j in (i + 1)..k {
                let a = &neighbors[i];
                let b = &neighbors[j];
                total += 1;
                let connected = adj.get(a).map_or(false, |m| m.contains_key(b)) || adj.get(b).map_or(false, |m| m.contains_key(a));
                if connected {
                    closed += 1;
                }
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        closed as f64 / total as f64
    }
}

/// `T = 3 * triangles / triplets` (§4.10). Undirected: each triangle is
/// counted once per vertex as it's found (three times total across the
/// sweep), matching the `3 * triangles` numerator directly. Directed: counts
/// cyclic triangles `u -> v -> w -> u` via every directed 2-path `u -> v ->
/// w`; each such path is itself one "triplet", and it closes into a triangle
/// exactly when the closing edge `w -> u` exists.
pub fn transitivity<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> f64 {
    let adj = g.adjacency_map();
    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();

    if g.traits().is_directed {
        let preds = g.predecessor_map();
        let mut closed = 0usize;
        let mut triplets = 0usize;
        for v in &vertices {
            let incoming: Vec<K> = preds.get(v).map(|m| m.keys().cloned().collect()).unwrap_or_default();
            let outgoing: Vec<K> = adj.get(v).map(|m| m.keys().cloned().collect()).unwrap_or_default();
            for u in &incoming {
                for w in &outgoing {
                    if u == w {
                        continue;
                    }
                    triplets += 1;
                    if adj.get(w).map_or(false, |m| m.contains_key(u)) {
                        closed += 1;
                    }
                }
            }
        }
        if triplets == 0 {
            0.0
        } else {
            closed as f64 / triplets as f64
        }
    } else {
        let mut closed_triples = 0usize;
        let mut triplets = 0usize;
        for v in &vertices {
            let neighbors: Vec<K> = adj.get(v).map(|m| m.keys().cloned().collect()).unwrap_or_default();
            let k = neighbors.len();
            if k < 2 {
                continue;
            }
            triplets += k * (k - 1) / 2;
            for i in 0..k {
                for j in (i + 1)..k {
                    if adj.get(&neighbors[i]).map_or(false, |m| m.contains_key(&neighbors[j])) {
                        closed_triples += 1;
                    }
                }
            }
        }
        if triplets == 0 {
            0.0
        } else {
            closed_triples as f64 / triplets as f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::UndirectedGraph;
    use crate::primitives::Traits;

    #[test]
    fn triangle_has_clustering_coefficient_one() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        g.add_edge_with_options(1, 3, &[]).unwrap();
        let cc = clustering_coefficient(&g);
        for k in [1u64, 2, 3] {
            assert_eq!(cc[&k], 1.0);
        }
        assert_eq!(global_clustering_coefficient(&g), 1.0);
        assert_eq!(transitivity(&g), 1.0);
    }

    #[test]
    fn star_has_zero_clustering() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3, 4] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        for t in [2u64, 3, 4] {
            g.add_edge_with_options(1, t, &[]).unwrap();
        }
        let cc = clustering_coefficient(&g);
        assert_eq!(cc[&1], 0.0);
        assert_eq!(global_clustering_coefficient(&g), 0.0);
        assert_eq!(transitivity(&g), 0.0);
    }
}
