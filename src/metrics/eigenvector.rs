//! Eigenvector centrality (§4.10): power iteration of the adjacency
//! operator, preprocessed once into a plain `K -> [K]` table so each
//! iteration is a flat array scan rather than a map lookup per entry.

use std::collections::{BTreeMap, HashMap};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::primitives::{Key, Value};

const MAX_ITER: usize = 100;
const TOLERANCE: f64 = 1e-6;

/// `A` for undirected graphs; the transposed `A` (i.e. in-neighbors) for
/// directed graphs, since `x_{t+1}(v) = sum_{u -> v} x_t(u)`. Start vector is
/// all ones; each step Euclidean-normalizes; a zero-norm step is an error
/// (the iteration collapsed to the zero vector — typically an edgeless
/// graph).
pub fn eigenvector_centrality<K: Key, T: Value, G: Graph<K, T>>(g: &G) -> Result<BTreeMap<K, f64>, GraphError<K>> {
    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();
    let n = vertices.len();
    if n == 0 {
        return Ok(BTreeMap::new());
    }
    let index: HashMap<K, usize> = vertices.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();

    // Incoming adjacency for directed graphs (transposed A); plain adjacency
    // (already symmetric) for undirected graphs.
    let operand = if g.traits().is_directed {
        g.predecessor_map()
    } else {
        g.adjacency_map()
    };
    let operator: Vec<Vec<usize>> = vertices
        .iter()
        .map(|v| operand.get(v).map(|m| m.keys().map(|k| index[k]).collect()).unwrap_or_default())
        .collect();

    let mut x = vec![1.0; n];
    for _ in 0..MAX_ITER {
        let mut next = vec![0.0; n];
        for (i, sources) in operator.iter().enumerate() {
            next[i] = sources.iter().map(|&j| x[j]).sum();
        }
        let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(GraphError::Other(
                "eigenvector centrality: power iteration collapsed to the zero vector".to_string(),
            ));
        }
        for v in next.iter_mut() {
            *v /= norm;
        }
        let l1: f64 = x.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        log::trace!("eigenvector centrality: power iteration step, l1 delta {l1}");
        x = next;
        if l1 < TOLERANCE {
            break;
        }
    }
    Ok(vertices.into_iter().zip(x).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::UndirectedGraph;
    use crate::primitives::Traits;

    #[test]
    fn star_center_has_highest_eigenvector_score() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3, 4, 5] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        for t in [2u64, 3, 4, 5] {
            g.add_edge_with_options(1, t, &[]).unwrap();
        }
        let ec = eigenvector_centrality(&g).unwrap();
        for leaf in [2u64, 3, 4, 5] {
            assert!(ec[&1] > ec[&leaf]);
        }
    }

    #[test]
    fn edgeless_graph_has_no_eigenvector() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        g.add_vertex_with_options(1u64, &[]).unwrap();
        g.add_vertex_with_options(2u64, &[]).unwrap();
        assert!(eigenvector_centrality(&g).is_err());
    }
}
