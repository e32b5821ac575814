//! Dijkstra's single-source shortest paths (§4.7): a decrease-key priority
//! queue keyed by tentative distance, a predecessor map for path
//! reconstruction, and a "pop target, walk predecessors backward, reverse"
//! reconstruction step.

use std::collections::HashMap;

use noisy_float::types::{n64, N64};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::primitives::{Key, Value};
use crate::queue::MinPriorityQueue;

/// Returns the sequence of keys on the shortest path from `src` to `tgt`,
/// inclusive of both endpoints. Weights must be non-negative (§4.7).
/// [`GraphError::TargetNotReachable`] if the queue empties before `tgt` pops.
pub fn dijkstra_from<K: Key, T: Value, G: Graph<K, T>>(
    g: &G,
    src: &K,
    tgt: &K,
) -> Result<Vec<K>, GraphError<K>> {
    if !g.has_vertex(src)? {
        return Err(GraphError::VertexNotFound(src.clone()));
    }
    if !g.has_vertex(tgt)? {
        return Err(GraphError::VertexNotFound(tgt.clone()));
    }
    let adj = g.adjacency_map();
    let mut dist: HashMap<K, N64> = HashMap::new();
    let mut pred: HashMap<K, K> = HashMap::new();
    let mut queue: MinPriorityQueue<K, N64> = MinPriorityQueue::new();

    dist.insert(src.clone(), n64(0.0));
    queue.push(src.clone(), n64(0.0));

    while let Some(u) = queue.pop() {
        if u == *tgt {
            let mut path = vec![u.clone()];
            let mut v = u;
            while let Some(p) = pred.get(&v) {
                path.push(p.clone());
                v = p.clone();
            }
            path.reverse();
            return Ok(path);
        }
        let d_u = *dist.get(&u).expect("popped vertex must have a tentative distance");
        if let Some(neighbors) = adj.get(&u) {
            for (v, edge) in neighbors {
                if edge.props.weight < 0.0 {
                    return Err(GraphError::NegativeWeightEdge(u.clone(), v.clone()));
                }
                let candidate = d_u + n64(edge.props.weight);
                let better = dist.get(v).map_or(true, |&d_v| candidate < d_v);
                if better {
                    log::trace!("dijkstra: relaxing edge, new tentative distance recorded");
                    dist.insert(v.clone(), candidate);
                    pred.insert(v.clone(), u.clone());
                    if queue.contains(v) {
                        queue.set_priority(v, candidate);
                    } else {
                        queue.push(v.clone(), candidate);
                    }
                }
            }
        }
    }
    Err(GraphError::TargetNotReachable)
}

/// Shortest-path distances from `src` to every vertex reachable from it
/// (`src` itself included, at distance `0.0`), used by the diameter and
/// average-path-length metrics (§4.10) so they don't re-run a full Dijkstra
/// per target pair.
pub fn dijkstra_distances_from<K: Key, T: Value, G: Graph<K, T>>(
    g: &G,
    src: &K,
) -> Result<std::collections::BTreeMap<K, f64>, GraphError<K>> {
    if !g.has_vertex(src)? {
        return Err(GraphError::VertexNotFound(src.clone()));
    }
    let adj = g.adjacency_map();
    let mut dist: HashMap<K, N64> = HashMap::new();
    let mut queue: MinPriorityQueue<K, N64> = MinPriorityQueue::new();
    let mut settled = std::collections::HashSet::new();

    dist.insert(src.clone(), n64(0.0));
    queue.push(src.clone(), n64(0.0));

    while let Some(u) = queue.pop() {
        if !settled.insert(u.clone()) {
            continue;
        }
        let d_u = *dist.get(&u).expect("popped vertex must have a tentative distance");
        if let Some(neighbors) = adj.get(&u) {
            for (v, edge) in neighbors {
                if edge.props.weight < 0.0 {
                    return Err(GraphError::NegativeWeightEdge(u.clone(), v.clone()));
                }
                let candidate = d_u + n64(edge.props.weight);
                let better = dist.get(v).map_or(true, |&d_v| candidate < d_v);
                if better {
                    dist.insert(v.clone(), candidate);
                    if queue.contains(v) {
                        queue.set_priority(v, candidate);
                    } else {
                        queue.push(v.clone(), candidate);
                    }
                }
            }
        }
    }
    Ok(dist.into_iter().map(|(k, d)| (k, d.raw())).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};
    use crate::primitives::{EdgeOption, Traits};

    #[test]
    fn shortest_path_on_weighted_chain() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3, 4] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[EdgeOption::Weight(1.0)]).unwrap();
        g.add_edge_with_options(2, 4, &[EdgeOption::Weight(5.0)]).unwrap();
        g.add_edge_with_options(1, 3, &[EdgeOption::Weight(2.0)]).unwrap();
        g.add_edge_with_options(3, 4, &[EdgeOption::Weight(2.0)]).unwrap();
        let path = dijkstra_from(&g, &1, &4).unwrap();
        assert_eq!(path, vec![1, 3, 4]);
    }

    #[test]
    fn unreachable_target_errors() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        g.add_vertex_with_options(1u64, &[]).unwrap();
        g.add_vertex_with_options(2u64, &[]).unwrap();
        assert!(matches!(
            dijkstra_from(&g, &1, &2),
            Err(GraphError::TargetNotReachable)
        ));
    }

    #[test]
    fn undirected_mst_style_graph_shortest_path() {
        let g = UndirectedGraph::new(|v: &u64| *v, Traits::new());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[EdgeOption::Weight(4.0)]).unwrap();
        g.add_edge_with_options(2, 3, &[EdgeOption::Weight(1.0)]).unwrap();
        g.add_edge_with_options(1, 3, &[EdgeOption::Weight(2.0)]).unwrap();
        assert_eq!(dijkstra_from(&g, &1, &3).unwrap(), vec![1, 3]);
    }
}
