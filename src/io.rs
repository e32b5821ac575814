//! Format-agnostic serialization seams (§6). This crate ships no concrete
//! encoding — no built-in JSON, GraphML, or DOT writer — only the trait
//! shapes a collaborating crate implements against. A GeoJSON exporter, for
//! instance, is exactly the kind of thing that would live on the other side
//! of [`Writer`]; it is deliberately not reproduced here.

use std::io;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::primitives::{Key, Value};

/// Reads a graph of type `G` from a byte stream. Implementors own the wire
/// format entirely (JSON, GraphML, DOT, ...); this crate only fixes the
/// shape of the seam.
pub trait Reader<K: Key, T: Value, G: Graph<K, T>> {
    fn read(&mut self, src: &mut dyn io::Read) -> Result<G, GraphError<K>>;
}

/// Writes a graph of type `G` to a byte stream.
pub trait Writer<K: Key, T: Value, G: Graph<K, T>> {
    fn write(&mut self, graph: &G, dst: &mut dyn io::Write) -> Result<(), GraphError<K>>;
}
