//! Topological ordering, strongly-connected components, and transitive
//! reduction (§4.9) — directed-graph-only operations. Tarjan SCC uses the
//! classic index/lowlink/on-stack triple with an iterative, unrecursed
//! "strongconnect" loop (an explicit work-stack of `(vertex, remaining
//! successors, just-returned)` frames standing in for the call stack a
//! recursive formulation would use), walking this crate's always-directed
//! successor map.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::GraphError;
use crate::graph::{DirectedGraph, Graph};
use crate::primitives::{Key, Value};

/// Kahn's algorithm (§4.9). [`GraphError::CyclicGraph`] if the output doesn't
/// cover every vertex.
pub fn topological_sort<K: Key, T: Value>(g: &DirectedGraph<K, T>) -> Result<Vec<K>, GraphError<K>> {
    topological_sort_with(g, None::<fn(&K, &K) -> std::cmp::Ordering>)
}

/// Deterministic variant: both the initial queue and each new frontier batch
/// are sorted by `less` before being appended to the processing queue (§4.9).
pub fn topological_sort_deterministic<K: Key, T: Value>(
    g: &DirectedGraph<K, T>,
    less: impl Fn(&K, &K) -> std::cmp::Ordering,
) -> Result<Vec<K>, GraphError<K>> {
    topological_sort_with(g, Some(less))
}

fn topological_sort_with<K: Key, T: Value>(
    g: &DirectedGraph<K, T>,
    less: Option<impl Fn(&K, &K) -> std::cmp::Ordering>,
) -> Result<Vec<K>, GraphError<K>> {
    let mut preds: HashMap<K, HashSet<K>> = g
        .predecessor_map()
        .into_iter()
        .map(|(k, m)| (k, m.into_keys().collect()))
        .collect();

    let mut frontier: Vec<K> = preds
        .iter()
        .filter(|(_, p)| p.is_empty())
        .map(|(k, _)| k.clone())
        .collect();
    if let Some(less) = less.as_ref() {
        frontier.sort_by(|a, b| less(a, b));
    } else {
        frontier.sort();
    }
    let mut queue: std::collections::VecDeque<K> = frontier.into_iter().collect();

    let adj = g.adjacency_map();
    let mut order = Vec::with_capacity(g.order());
    while let Some(v) = queue.pop_front() {
        log::trace!("kahn: dequeuing vertex with zero remaining in-degree");
        order.push(v.clone());
        let mut freed = Vec::new();
        if let Some(successors) = adj.get(&v) {
            for u in successors.keys() {
                if let Some(p) = preds.get_mut(u) {
                    p.remove(&v);
                    if p.is_empty() {
                        freed.push(u.clone());
                    }
                }
            }
        }
        if let Some(less) = less.as_ref() {
            freed.sort_by(|a, b| less(a, b));
        } else {
            freed.sort();
        }
        queue.extend(freed);
    }

    if order.len() != g.order() {
        return Err(GraphError::CyclicGraph);
    }
    Ok(order)
}

/// Iterative Tarjan SCC (§4.9). Directed only —
/// [`GraphError::SCCDetectionNotDirected`] has no caller here since this
/// function's signature is restricted to [`DirectedGraph`] at compile time;
/// the error variant documents the contract for callers dispatching
/// dynamically over both graph kinds.
pub fn strongly_connected_components<K: Key, T: Value>(g: &DirectedGraph<K, T>) -> Vec<Vec<K>> {
    let adj = g.adjacency_map();
    let mut index = 0usize;
    let mut stack: Vec<K> = Vec::new();
    let mut on_stack: HashSet<K> = HashSet::new();
    let mut indices: HashMap<K, usize> = HashMap::new();
    let mut lowlink: HashMap<K, usize> = HashMap::new();
    let mut sccs: Vec<Vec<K>> = Vec::new();

    // Work-stack frames: (vertex, remaining successors to examine, "just returned" flag).
    let mut work: Vec<(K, Vec<K>, bool)> = Vec::new();

    for start in g.vertices().into_iter().map(|v| v.id) {
        if indices.contains_key(&start) {
            continue;
        }
        let succs: Vec<K> = adj.get(&start).map(|m| m.keys().cloned().collect()).unwrap_or_default();
        work.push((start, succs, false));

        while let Some((u, succs, just_returned)) = work.last_mut() {
            let u = u.clone();
            if !indices.contains_key(&u) {
                indices.insert(u.clone(), index);
                lowlink.insert(u.clone(), index);
                index += 1;
                stack.push(u.clone());
                on_stack.insert(u.clone());
            }
            if *just_returned {
                let v_low = *lowlink.get(succs.last().expect("just_returned implies a prior successor")).unwrap();
                let u_low = lowlink.get_mut(&u).unwrap();
                *u_low = (*u_low).min(v_low);
                *just_returned = false;
                succs.pop();
            }
            if let Some(v) = succs.last().cloned() {
                match indices.get(&v) {
                    None => {
                        *just_returned = true;
                        let v_succs: Vec<K> = adj.get(&v).map(|m| m.keys().cloned().collect()).unwrap_or_default();
                        work.push((v, v_succs, false));
                        continue;
                    }
                    Some(&v_idx) if on_stack.contains(&v) => {
                        let u_low = lowlink.get_mut(&u).unwrap();
                        *u_low = (*u_low).min(v_idx);
                        succs.pop();
                    }
                    Some(_) => {
                        succs.pop();
                    }
                }
                continue;
            }
            // all successors examined: close the SCC if u is a root
            let u_idx = indices[&u];
            let u_low = lowlink[&u];
            if u_idx == u_low {
                let mut scc = Vec::new();
                loop {
                    let v = stack.pop().unwrap();
                    on_stack.remove(&v);
                    let done = v == u;
                    scc.push(v);
                    if done {
                        break;
                    }
                }
                sccs.push(scc);
            }
            work.pop();
            if let Some((_, _, jr)) = work.last_mut() {
                *jr = true;
            }
        }
    }
    sccs
}

/// Smallest edge subset preserving reachability (§4.9). Clones `g`; for each
/// vertex `u` and each direct successor `s`, DFS from `s` in the clone and
/// delete any edge `(u, w)` where `w` is both reachable-beyond-`s` and a
/// direct successor of `u`. [`GraphError::CyclicGraph`] if a DFS revisits a
/// vertex still on its own stack (the clone is not a DAG).
pub fn transitive_reduction<K: Key, T: Value>(g: &DirectedGraph<K, T>) -> Result<DirectedGraph<K, T>, GraphError<K>> {
    let reduced = g.deep_clone();
    let direct_successors: BTreeMap<K, BTreeMap<K, ()>> = reduced
        .adjacency_map()
        .into_iter()
        .map(|(u, m)| (u, m.into_keys().map(|k| (k, ())).collect()))
        .collect();

    for u in reduced.vertices().into_iter().map(|v| v.id) {
        let successors: Vec<K> = direct_successors.get(&u).map(|m| m.keys().cloned().collect()).unwrap_or_default();
        for s in successors {
            if !reduced.has_edge(&u, &s)? {
                continue; // already removed by an earlier `s` in this same loop
            }
            let reachable_beyond_s = reachable_from_excluding_self(&reduced, &s)?;
            for w in reachable_beyond_s {
                if w != s && direct_successors.get(&u).map_or(false, |m| m.contains_key(&w)) && reduced.has_edge(&u, &w)? {
                    log::trace!("transitive reduction: removing redundant edge");
                    reduced.remove_edge(&u, &w)?;
                }
            }
        }
    }
    Ok(reduced)
}

/// DFS from `start` (exclusive) over `g`'s current adjacency, returning every
/// vertex reachable beyond `start`. [`GraphError::CyclicGraph`] if the walk
/// revisits a vertex still on the DFS stack.
fn reachable_from_excluding_self<K: Key, T: Value>(g: &DirectedGraph<K, T>, start: &K) -> Result<HashSet<K>, GraphError<K>> {
    let adj = g.adjacency_map();
    let mut reached = HashSet::new();
    let mut on_path: Vec<K> = Vec::new();
    let mut stack: Vec<(K, Vec<K>)> = Vec::new();
    let first_succs: Vec<K> = adj.get(start).map(|m| m.keys().cloned().collect()).unwrap_or_default();
    stack.push((start.clone(), first_succs));
    on_path.push(start.clone());

    while let Some((u, succs)) = stack.last_mut() {
        if let Some(v) = succs.pop() {
            if on_path.contains(&v) {
                return Err(GraphError::CyclicGraph);
            }
            if reached.insert(v.clone()) {
                let v_succs: Vec<K> = adj.get(&v).map(|m| m.keys().cloned().collect()).unwrap_or_default();
                on_path.push(v.clone());
                stack.push((v, v_succs));
            }
        } else {
            let _ = u;
            on_path.pop();
            stack.pop();
        }
    }
    Ok(reached)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitives::Traits;

    #[test]
    fn diamond_kahn_scenario() {
        // §8 scenario 3: A->B, A->C, B->D, C->D.
        let g = DirectedGraph::new(|v: &char| *v, Traits::new().directed());
        for k in ['A', 'B', 'C', 'D'] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options('A', 'B', &[]).unwrap();
        g.add_edge_with_options('A', 'C', &[]).unwrap();
        g.add_edge_with_options('B', 'D', &[]).unwrap();
        g.add_edge_with_options('C', 'D', &[]).unwrap();

        let order = topological_sort(&g).unwrap();
        let pos = |k: char| order.iter().position(|&v| v == k).unwrap();
        assert!(pos('A') < pos('B'));
        assert!(pos('A') < pos('C'));
        assert!(pos('B') < pos('D'));
        assert!(pos('C') < pos('D'));

        let det = topological_sort_deterministic(&g, |a, b| a.cmp(b)).unwrap();
        assert_eq!(det, vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn cyclic_graph_is_rejected() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        g.add_edge_with_options(3, 1, &[]).unwrap();
        assert!(matches!(topological_sort(&g), Err(GraphError::CyclicGraph)));
    }

    #[test]
    fn three_cycle_is_one_scc() {
        // §8 scenario 6.
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        g.add_edge_with_options(3, 1, &[]).unwrap();
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), 1);
        let mut members = sccs[0].clone();
        members.sort();
        assert_eq!(members, vec![1, 2, 3]);
    }

    #[test]
    fn scc_partitions_every_vertex() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [0u64, 1, 2, 3, 4, 5] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        for (s, t) in [(0, 1), (1, 2), (2, 0), (3, 1), (3, 2), (4, 5), (5, 4)] {
            g.add_edge_with_options(s, t, &[]).unwrap();
        }
        let sccs = strongly_connected_components(&g);
        let mut all: Vec<u64> = sccs.iter().flatten().cloned().collect();
        all.sort();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(sccs.len(), 3);
    }

    #[test]
    fn transitive_reduction_preserves_reachability() {
        let g = DirectedGraph::new(|v: &u64| *v, Traits::new().directed());
        for k in [1u64, 2, 3] {
            g.add_vertex_with_options(k, &[]).unwrap();
        }
        g.add_edge_with_options(1, 2, &[]).unwrap();
        g.add_edge_with_options(2, 3, &[]).unwrap();
        g.add_edge_with_options(1, 3, &[]).unwrap(); // redundant: 1->2->3 already implies reachability

        let reduced = transitive_reduction(&g).unwrap();
        assert_eq!(reduced.size(), 2);
        assert!(!reduced.has_edge(&1, &3).unwrap());
        assert!(reduced.has_edge(&1, &2).unwrap());
        assert!(reduced.has_edge(&2, &3).unwrap());
    }
}
