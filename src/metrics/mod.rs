//! Centrality, clustering, and whole-graph structural metrics (§4.10). Every
//! function here is built from §4.10's algorithm descriptions, reusing this
//! crate's own `traversal`/`paths` building blocks, with `log::trace!` on
//! expensive passes in the same style used throughout the crate.

mod betweenness;
mod clustering;
mod eigenvector;
mod pagerank;
mod structural;

pub use betweenness::betweenness_centrality;
pub use clustering::{clustering_coefficient, global_clustering_coefficient, transitivity};
pub use eigenvector::eigenvector_centrality;
pub use pagerank::pagerank;
pub use structural::{average_path_length, density, diameter, modularity};

use std::collections::BTreeMap;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::primitives::{Key, Value};
use crate::traversal::bfs_with_depth_from;

/// `C(v) = degree(v) / (n - 1)`. Directed graphs use the full (in + out)
/// degree (§4.10). Empty map for `n < 2`.
pub fn degree_centrality<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> Result<BTreeMap<K, f64>, GraphError<K>> {
    let n = g.order();
    let mut result = BTreeMap::new();
    if n < 2 {
        return Ok(result);
    }
    for v in g.vertices() {
        let degree = g.degree(&v.id)?;
        result.insert(v.id, degree as f64 / (n - 1) as f64);
    }
    Ok(result)
}

/// Closeness centrality (§4.10): BFS-with-depth starting at `0` (not the
/// generic traversal API's depth-1 convention, §9 Open Question 4) from each
/// vertex; `C(v) = numReachable / sumDist` when both are positive, else `0`.
pub fn closeness_centrality<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> Result<BTreeMap<K, f64>, GraphError<K>> {
    let mut result = BTreeMap::new();
    for v in g.vertices() {
        let mut sum_dist: u64 = 0;
        let mut num_reachable: u64 = 0;
        bfs_with_depth_from(g, &v.id, 0, |k, depth| {
            if *k != v.id {
                sum_dist += depth as u64;
                num_reachable += 1;
            }
            false
        })?;
        let c = if sum_dist > 0 && num_reachable > 0 {
            num_reachable as f64 / sum_dist as f64
        } else {
            0.0
        };
        result.insert(v.id, c);
    }
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};
    use crate::primitives::Traits;

    #[test]
    fn degree_centrality_star() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3, 4, 5] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        for t in [2u64, 3, 4, 5] {
            g.add_edge_with_options(1, t, &[]).unwrap();
        }
        let c = degree_centrality(&g).unwrap();
        assert_eq!(c[&1], 1.0);
        assert_eq!(c[&2], 0.25);
    }

    #[test]
    fn degree_centrality_directed_counts_both_directions() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 1, &[]).unwrap();
        let c = degree_centrality(&g).unwrap();
        assert_eq!(c[&1], 1.0); // in=1, out=1, (n-1)=2
    }

    #[test]
    fn degree_centrality_trivial_graph_is_empty() {
        let g: UndirectedGraph<u64, u64> = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        g.add_vertex_with_options(1u64, &[]).unwrap();
        assert!(degree_centrality(&g).unwrap().is_empty());
    }

    #[test]
    fn closeness_centrality_star_center_is_highest() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3, 4, 5] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        for t in [2u64, 3, 4, 5] {
            g.add_edge_with_options(1, t, &[]).unwrap();
        }
        let c = closeness_centrality(&g).unwrap();
        // center: 4 reachable at depth 1 each -> 4/4 = 1.0
        assert_eq!(c[&1], 1.0);
        // leaf: 1 reachable at depth 1 (center), 3 at depth 2 -> 4 / (1+2+2+2) = 4/7
        assert!((c[&2] - 4.0 / 7.0).abs() < 1e-12);
    }
}
