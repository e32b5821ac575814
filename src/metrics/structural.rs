//! Whole-graph structural metrics (§4.10): density, diameter, average path
//! length, and modularity.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::paths::dijkstra_distances_from;
use crate::primitives::{Key, Value};

/// Directed: `m / (n(n-1))`. Undirected: `2m / (n(n-1))`. Zero for `n < 2`.
pub fn density<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> f64 {
    let n = g.order();
    if n < 2 {
        return 0.0;
    }
    let m = g.size() as f64;
    let n = n as f64;
    if g.traits().is_directed {
        m / (n * (n - 1.0))
    } else {
        2.0 * m / (n * (n - 1.0))
    }
}

/// Largest shortest-path length over all ordered pairs `(i != j)`.
/// [`GraphError::TargetNotReachable`] if any ordered pair is disconnected.
pub fn diameter<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> Result<f64, GraphError<K>> {
    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();
    let mut max_dist = 0.0f64;
    for src in &vertices {
        let dist = dijkstra_distances_from(g, src)?;
        for t in &vertices {
            if t == src {
                continue;
            }
            let d = dist.get(t).ok_or_else(|| GraphError::TargetNotReachable)?;
            if *d > max_dist {
                max_dist = *d;
            }
        }
    }
    Ok(max_dist)
}

/// Mean shortest-path length over all ordered pairs `(i != j)`. Same
/// unreachability semantics as [`diameter`].
pub fn average_path_length<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> Result<f64, GraphError<K>> {
    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();
    let mut total = 0.0f64;
    let mut count = 0u64;
    for src in &vertices {
        let dist = dijkstra_distances_from(g, src)?;
        for t in &vertices {
            if t == src {
                continue;
            }
            let d = dist.get(t).ok_or_else(|| GraphError::TargetNotReachable)?;
            total += *d;
            count += 1;
        }
    }
    Ok(if count == 0 { 0.0 } else { total / count as f64 })
}

/// `Q` for a community partition (§4.10). Requires at least one edge.
/// Undirected: `Q = (1/2m) sum_{i<j, c_i=c_j} [A_ij - k_i k_j / 2m]`.
/// Directed: `Q = (1/m) sum_{i,j, c_i=c_j} [A_ij - k_i^out k_j^in / m]`,
/// iterating *all* ordered pairs including `(v, v)` (§9 Open Question 5,
/// kept as specified rather than "fixed").
pub fn modularity<K: Key, T: Value, G: Graph<K, T>, C: Eq + Hash + Clone>(
    g: &G,
    communities: &HashMap<K, C>,
) -> Result<f64, GraphError<K>> {
    let m = g.size();
    if m == 0 {
        return Err(GraphError::Other("modularity is undefined for a graph with no edges".to_string()));
    }
    let m_f = m as f64;
    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();
    let adj = g.adjacency_map();

    let same_community = |a: &K, b: &K| -> bool {
        match (communities.get(a), communities.get(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    };

    if g.traits().is_directed {
        let preds = g.predecessor_map();
        let mut q = 0.0;
        for i in &vertices {
            let k_out_i = adj.get(i).map_or(0, |m| m.len()) as f64;
            for j in &vertices {
                if !same_community(i, j) {
                    continue;
                }
                let k_in_j = preds.get(j).map_or(0, |m| m.len()) as f64;
                let a_ij = if adj.get(i).map_or(false, |m| m.contains_key(j)) { 1.0 } else { 0.0 };
                q += a_ij - (k_out_i * k_in_j) / m_f;
            }
        }
        Ok(q / m_f)
    } else {
        let mut q = 0.0;
        for idx_i in 0..vertices.len() {
            for idx_j in (idx_i + 1)..vertices.len() {
                let i = &vertices[idx_i];
                let j = &vertices[idx_j];
                if !same_community(i, j) {
                    continue;
                }
                let k_i = adj.get(i).map_or(0, |m| m.len()) as f64;
                let k_j = adj.get(j).map_or(0, |m| m.len()) as f64;
                let a_ij = if adj.get(i).map_or(false, |m| m.contains_key(j)) { 1.0 } else { 0.0 };
                q += a_ij - (k_i * k_j) / (2.0 * m_f);
            }
        }
        Ok(q / (2.0 * m_f))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};
    use crate::primitives::{EdgeOption, Traits};

    #[test]
    fn density_of_a_triangle() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        g.add_edge_with_options(1, 3, &[]).unwrap();
        assert_eq!(density(&g), 1.0);
    }

    #[test]
    fn diameter_and_average_path_length_on_a_chain() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[EdgeOption::Weight(1.0)]).unwrap();
        g.add_edge_with_options(2, 3, &[EdgeOption::Weight(1.0)]).unwrap();
        assert_eq!(diameter(&g).unwrap(), 2.0);
        // pairs: (1,2)=1 (1,3)=2 (2,1)=1 (2,3)=1 (3,1)=2 (3,2)=1 -> mean = 8/6
        assert!((average_path_length(&g).unwrap() - 8.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_graph_has_no_diameter() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        assert!(matches!(diameter(&g), Err(GraphError::TargetNotReachable)));
    }

    #[test]
    fn modularity_rewards_a_clean_split() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3, 4] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(3, 4, &[]).unwrap();
        let mut communities = HashMap::new();
        communities.insert(1u64, 'a');
        communities.insert(2u64, 'a');
        communities.insert(3u64, 'b');
        communities.insert(4u64, 'b');
        let q = modularity(&g, &communities).unwrap();
        assert!(q > 0.0);
    }

    #[test]
    fn modularity_requires_at_least_one_edge() {
        let g: DirectedGraph<u64, u64> = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        let communities: HashMap<u64, u8> = HashMap::new();
        assert!(modularity(&g, &communities).is_err());
    }
}
