//! Standalone cycle-prevention procedure (§4.5), usable as a fallback when a
//! ledger has no fast-path `would_create_cycle`. DFS over the predecessor
//! map from `source`, seeking `target`; a cycle through `(source, target)`
//! closes iff `target` is already reachable backward from `source`, i.e.
//! `source` is reachable forward from `target`.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::error::GraphError;
use crate::primitives::{Edge, Key};

/// `O(V + E)`. Returns [`GraphError::SameSourceAndTarget`] when `source ==
/// target`, matching the ledger fast path's `s == t` short-circuit.
pub fn would_create_cycle<K: Key>(
    predecessors: &BTreeMap<K, BTreeMap<K, Edge<K>>>,
    source: &K,
    target: &K,
) -> Result<bool, GraphError<K>> {
    if source == target {
        return Err(GraphError::SameSourceAndTarget(source.clone()));
    }
    let mut visited: HashSet<K> = HashSet::new();
    let mut stack = vec![source.clone()];
    while let Some(u) = stack.pop() {
        if !visited.insert(u.clone()) {
            continue;
        }
        if u == *target {
            return Ok(true);
        }
        if let Some(preds) = predecessors.get(&u) {
            for pred in preds.keys() {
                if !visited.contains(pred) {
                    stack.push(pred.clone());
                }
            }
        }
    }
    Ok(false)
}
