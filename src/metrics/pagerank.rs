//! PageRank (§4.10), directed graphs only. Dangling-node mass is
//! redistributed uniformly; edge weights are honored when the graph's
//! `is_weighted` trait is set.

use std::collections::BTreeMap;

use crate::error::GraphError;
use crate::graph::{DirectedGraph, Graph};
use crate::primitives::{Key, Value};

/// `damping` must be in `(0, 1)`, `max_iter > 0`, `tol > 0`, else
/// [`GraphError::Other`]. Terminates on L1 diff `< tol` or the iteration
/// cap; final scores are normalized to sum to `1`.
pub fn pagerank<K: Key, T: Value>(
    g: &DirectedGraph<K, T>,
    damping: f64,
    max_iter: usize,
    tol: f64,
) -> Result<BTreeMap<K, f64>, GraphError<K>> {
    if !(damping > 0.0 && damping < 1.0) {
        return Err(GraphError::Other("pagerank: damping factor must be in (0, 1)".to_string()));
    }
    if max_iter == 0 {
        return Err(GraphError::Other("pagerank: max_iter must be > 0".to_string()));
    }
    if tol <= 0.0 {
        return Err(GraphError::Other("pagerank: tol must be > 0".to_string()));
    }

    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();
    let n = vertices.len();
    if n == 0 {
        return Ok(BTreeMap::new());
    }
    let n_f = n as f64;
    let weighted = g.traits().is_weighted;
    let out = g.adjacency_map();
    let inn = g.predecessor_map();

    let out_weight: BTreeMap<K, f64> = vertices
        .iter()
        .map(|v| {
            let w = out.get(v).map_or(0.0, |m| {
                if weighted {
                    m.values().map(|e| e.props.weight).sum()
                } else {
                    m.len() as f64
                }
            });
            (v.clone(), w)
        })
        .collect();

    let dangling: Vec<K> = vertices
        .iter()
        .filter(|v| out.get(v).map_or(true, |m| m.is_empty()))
        .cloned()
        .collect();

    let mut pr: BTreeMap<K, f64> = vertices.iter().cloned().map(|k| (k, 1.0 / n_f)).collect();

    for iter in 0..max_iter {
        let dangling_sum: f64 = dangling.iter().map(|v| pr[v]).sum();
        let base = (1.0 - damping) / n_f + damping * dangling_sum / n_f;

        let mut next: BTreeMap<K, f64> = BTreeMap::new();
        for v in &vertices {
            let mut value = base;
            if let Some(preds) = inn.get(v) {
                for (u, edge) in preds {
                    let out_w = out_weight[u];
                    if out_w == 0.0 {
                        continue;
                    }
                    let share = if weighted { edge.props.weight / out_w } else { 1.0 / out_w };
                    value += damping * pr[u] * share;
                }
            }
            next.insert(v.clone(), value);
        }

        let diff: f64 = vertices.iter().map(|v| (next[v] - pr[v]).abs()).sum();
        log::trace!("pagerank: iteration {iter}, l1 diff {diff}");
        pr = next;
        if diff < tol {
            break;
        }
    }

    let total: f64 = pr.values().sum();
    if total > 0.0 {
        for v in pr.values_mut() {
            *v /= total;
        }
    }
    Ok(pr)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitives::Traits;

    #[test]
    fn scores_sum_to_one() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        g.add_edge_with_options(3, 1, &[]).unwrap();
        let pr = pagerank(&g, 0.85, 100, 1e-9).unwrap();
        let total: f64 = pr.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_damping() {
        let g: DirectedGraph<u64, u64> = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        assert!(pagerank(&g, 1.5, 100, 1e-9).is_err());
        assert!(pagerank(&g, 0.85, 0, 1e-9).is_err());
        assert!(pagerank(&g, 0.85, 100, 0.0).is_err());
    }

    #[test]
    fn dangling_node_mass_is_redistributed() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        // vertex 3 is dangling (no out-edges); scores should still sum to 1.
        let pr = pagerank(&g, 0.85, 100, 1e-9).unwrap();
        let total: f64 = pr.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(pr[&3] >= (1.0 - 0.85) / 3.0 - 1e-9);
    }
}
