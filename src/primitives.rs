//! Value types shared by every graph variant (§3): vertices, edges, the
//! property bag they carry, and the immutable trait record that configures a
//! graph at construction time.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Bounds required of a vertex key (§3: "totally ordered, hashable").
/// `BTreeMap` only needs `Ord`, but `Hash` is kept in the bound for fidelity
/// to the key contract §3 describes, and because hashing callers (the `T ->
/// K` hash function) routinely need it.
pub trait Key: Ord + Clone + fmt::Debug + Hash + Send + Sync + 'static {}
impl<T: Ord + Clone + fmt::Debug + Hash + Send + Sync + 'static> Key for T {}

/// Bounds required of the opaque per-vertex value type `T`.
pub trait Value: Clone + Send + Sync + 'static {}
impl<T: Clone + Send + Sync + 'static> Value for T {}

/// The attribute bag carried by both vertices and edges: a weight used by
/// weighted algorithms, an opaque metadata slot, and a string-keyed bag of
/// opaque attributes (§3's "items").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub weight: f64,
    pub metadata: Option<serde_json::Value>,
    pub items: HashMap<String, serde_json::Value>,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            weight: 0.0,
            metadata: None,
            items: HashMap::new(),
        }
    }
}

pub type VertexProperties = Properties;
pub type EdgeProperties = Properties;

/// A functional option mutating a [`Properties`] bag, used by the
/// `*WithOptions` family on the `Graph` contract (§4.1).
#[derive(Debug, Clone)]
pub enum PropertyOption {
    Weight(f64),
    Metadata(serde_json::Value),
    Item(String, serde_json::Value),
}

impl PropertyOption {
    pub fn apply(&self, props: &mut Properties) {
        match self {
            PropertyOption::Weight(w) => props.weight = *w,
            PropertyOption::Metadata(m) => props.metadata = Some(m.clone()),
            PropertyOption::Item(k, v) => {
                props.items.insert(k.clone(), v.clone());
            }
        }
    }
}

pub type VertexOption = PropertyOption;
pub type EdgeOption = PropertyOption;

/// `(id, value, properties)` — `id` is derived from `value` by the graph's
/// hash function at insertion time and is the vertex's unique identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<K, T> {
    pub id: K,
    pub value: T,
    pub props: VertexProperties,
}

impl<K, T> Vertex<K, T> {
    pub fn new(id: K, value: T) -> Self {
        Self {
            id,
            value,
            props: VertexProperties::default(),
        }
    }
}

/// `(source, target, properties)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<K> {
    pub source: K,
    pub target: K,
    pub props: EdgeProperties,
}

impl<K: Clone + PartialEq> Edge<K> {
    pub fn new(source: K, target: K) -> Self {
        Self {
            source,
            target,
            props: EdgeProperties::default(),
        }
    }

    /// Whether the edge goes from a vertex to itself.
    pub fn is_cyclic(&self) -> bool {
        self.source == self.target
    }

    /// Given one endpoint, returns the other.
    pub fn other(&self, id: &K) -> K {
        if *id == self.source {
            self.target.clone()
        } else {
            self.source.clone()
        }
    }

    /// Returns a clone of this edge with source and target swapped, used to
    /// build the mirrored orientation stored by undirected graphs.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            props: self.props.clone(),
        }
    }
}

/// Immutable configuration of a graph, set once at construction (§3).
///
/// Built with the combinator methods below rather than field literals, so
/// the derived combinations (`tree()` = `rooted() + acyclic() +
/// prevent_cycles()`) stay in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Traits {
    pub is_directed: bool,
    pub is_acyclic: bool,
    pub prevent_cycles: bool,
    pub is_rooted: bool,
    pub is_weighted: bool,
    pub is_multigraph: bool,
}

impl Traits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self) -> Self {
        self.is_directed = true;
        self
    }

    pub fn acyclic(mut self) -> Self {
        self.is_acyclic = true;
        self
    }

    pub fn prevent_cycles(mut self) -> Self {
        self.prevent_cycles = true;
        self
    }

    pub fn rooted(mut self) -> Self {
        self.is_rooted = true;
        self
    }

    /// `rooted + acyclic + prevent_cycles`, per §6's `Tree` trait option.
    pub fn tree(self) -> Self {
        self.rooted().acyclic().prevent_cycles()
    }

    pub fn weighted(mut self) -> Self {
        self.is_weighted = true;
        self
    }

    /// Advisory only — the ledger contract refuses a second edge between the
    /// same ordered pair regardless of this flag (§3, Open Question 2).
    pub fn multigraph(mut self) -> Self {
        self.is_multigraph = true;
        self
    }
}
