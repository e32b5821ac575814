//! Brandes betweenness centrality (§4.10), unweighted (BFS) and weighted
//! (Dijkstra-like) variants sharing a single back-accumulation pass.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use noisy_float::types::n64;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::primitives::{Key, Value};
use crate::queue::MinPriorityQueue;

const EPS: f64 = 1e-14;

/// `weighted = false` uses BFS with unit edge weight; `weighted = true` uses
/// a Dijkstra-like relaxation with equality tolerance `1e-14` to accumulate
/// sigma over tied shortest paths, and rejects negative-weight edges.
/// Undirected graphs have every score halved at the end (§4.10).
pub fn betweenness_centrality<K: Key, T: Value, G: Graph<K, T>>(
    g: &G,
    weighted: bool,
) -> Result<BTreeMap<K, f64>, GraphError<K>> {
    let adj = g.adjacency_map();
    let vertices: Vec<K> = g.vertices().into_iter().map(|v| v.id).collect();
    let mut bc: HashMap<K, f64> = vertices.iter().cloned().map(|k| (k, 0.0)).collect();

    for s in &vertices {
        let mut stack: Vec<K> = Vec::new();
        let mut preds: HashMap<K, Vec<K>> = vertices.iter().cloned().map(|k| (k, Vec::new())).collect();
        let mut sigma: HashMap<K, f64> = vertices.iter().cloned().map(|k| (k, 0.0)).collect();
        let mut dist: HashMap<K, f64> = HashMap::new();
        sigma.insert(s.clone(), 1.0);
        dist.insert(s.clone(), 0.0);

        if !weighted {
            let mut queue = VecDeque::new();
            queue.push_back(s.clone());
            while let Some(v) = queue.pop_front() {
                stack.push(v.clone());
                if let Some(neighbors) = adj.get(&v) {
                    for w in neighbors.keys() {
                        if !dist.contains_key(w) {
                            dist.insert(w.clone(), dist[&v] + 1.0);
                            queue.push_back(w.clone());
                        }
                        if (dist[w] - (dist[&v] + 1.0)).abs() < EPS {
                            *sigma.get_mut(w).unwrap() += sigma[&v];
                            preds.get_mut(w).unwrap().push(v.clone());
                        }
                    }
                }
            }
        } else {
            let mut queue: MinPriorityQueue<K, noisy_float::types::N64> = MinPriorityQueue::new();
            queue.push(s.clone(), n64(0.0));
            let mut settled: HashSet<K> = HashSet::new();
            while let Some(v) = queue.pop() {
                if !settled.insert(v.clone()) {
                    continue;
                }
                stack.push(v.clone());
                let d_v = dist[&v];
                if let Some(neighbors) = adj.get(&v) {
                    for (w, edge) in neighbors {
                        if edge.props.weight < 0.0 {
                            return Err(GraphError::NegativeWeightEdge(v.clone(), w.clone()));
                        }
                        let candidate = d_v + edge.props.weight;
                        let known = dist.get(w).copied();
                        if known.map_or(true, |d| candidate < d - EPS) {
                            dist.insert(w.clone(), candidate);
                            sigma.insert(w.clone(), sigma[&v]);
                            preds.insert(w.clone(), vec![v.clone()]);
                            if queue.contains(w) {
                                queue.set_priority(w, n64(candidate));
                            } else {
                                queue.push(w.clone(), n64(candidate));
                            }
                        } else if let Some(d) = known {
                            if (candidate - d).abs() < EPS {
                                *sigma.get_mut(w).unwrap() += sigma[&v];
                                preds.get_mut(w).unwrap().push(v.clone());
                            }
                        }
                    }
                }
            }
        }

        log::trace!("brandes: back-accumulating dependency for one source");
        let mut delta: HashMap<K, f64> = vertices.iter().cloned().map(|k| (k, 0.0)).collect();
        while let Some(w) = stack.pop() {
            let delta_w = delta[&w];
            let sigma_w = sigma[&w];
            for v in &preds[&w] {
                *delta.get_mut(v).unwrap() += (sigma[v] / sigma_w) * (1.0 + delta_w);
            }
            if w != *s {
                *bc.get_mut(&w).unwrap() += delta_w;
            }
        }
    }

    if !g.traits().is_directed {
        for v in bc.values_mut() {
            *v /= 2.0;
        }
    }
    Ok(bc.into_iter().collect())
}
