//! Cursor-based, cancellable streaming enumeration of vertices and edges
//! (§4.11). `std::sync::mpsc` plus a small `Arc<AtomicBool>` cancellation
//! token follow the plain-threads concurrency model of §5 — no async runtime
//! is introduced here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SendError, Sender};
use std::sync::Arc;

use crate::graph::Graph;
use crate::primitives::{Edge, Key, Value, Vertex};

/// Opaque, serializable position within a streaming enumeration (§6): the
/// current implementation is the decimal digits of a non-negative 64-bit
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    offset: u64,
}

impl Cursor {
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    /// Serializes the cursor's position.
    pub fn state(&self) -> Vec<u8> {
        self.offset.to_string().into_bytes()
    }

    /// Restores position from a previously-serialized state.
    pub fn set_state(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        let text = std::str::from_utf8(bytes).map_err(|_| StreamError::InvalidCursor)?;
        self.offset = text.parse().map_err(|_| StreamError::InvalidCursor)?;
        Ok(())
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("limit out of range")]
    LimitOutOfRange,
    #[error("invalid cursor state")]
    InvalidCursor,
    #[error("stream cancelled at offset {0}")]
    Cancelled(u64),
}

/// A cooperative cancellation token: cheaply cloneable, checked before every
/// dispatch (§5).
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Streams `g`'s current vertex snapshot to `sink`, one batch of at most
/// `limit` vertices at a time, resuming from `cursor`'s position (§4.11).
/// The snapshot is taken once, at the start of the call; later mutations to
/// `g` are not reflected. `cursor` tracks the offset of the next vertex to
/// dispatch, so a caller can persist [`Cursor::state`] and resume later by
/// calling [`Cursor::set_state`] before re-invoking this function. Stops
/// early, leaving `cursor` at the last dispatched offset, if the receiving
/// end of `sink` is dropped or `token` is cancelled.
pub fn stream_vertices<K: Key, T: Value, G: Graph<K, T>>(
    g: &G,
    token: &CancellationToken,
    cursor: &mut Cursor,
    limit: usize,
    sink: Sender<Vec<Vertex<K, T>>>,
) -> Result<(), StreamError> {
    if limit == 0 {
        return Err(StreamError::LimitOutOfRange);
    }
    let snapshot = g.vertices();
    let mut offset = cursor.offset as usize;
    while offset < snapshot.len() {
        if token.is_cancelled() {
            cursor.offset = offset as u64;
            return Err(StreamError::Cancelled(cursor.offset));
        }
        let end = (offset + limit).min(snapshot.len());
        let batch = snapshot[offset..end].to_vec();
        log::trace!("streaming: dispatching a vertex batch");
        if sink.send(batch).is_err() {
            cursor.offset = offset as u64;
            return Ok(());
        }
        offset = end;
        cursor.offset = offset as u64;
    }
    Ok(())
}

/// Streams `g`'s current edge snapshot to `sink`, one edge at a time
/// (preserved per-edge granularity, §4.11), checking for cancellation
/// between every dispatch and advancing `cursor` after each one.
pub fn stream_edges<K: Key, T: Value, G: Graph<K, T>>(
    g: &G,
    token: &CancellationToken,
    cursor: &mut Cursor,
    limit: usize,
    sink: Sender<Edge<K>>,
) -> Result<(), StreamError> {
    if limit == 0 {
        return Err(StreamError::LimitOutOfRange);
    }
    let snapshot = g.edges();
    let mut offset = cursor.offset as usize;
    while offset < snapshot.len() {
        let batch_end = (offset + limit).min(snapshot.len());
        for edge in &snapshot[offset..batch_end] {
            if token.is_cancelled() {
                cursor.offset = offset as u64;
                return Err(StreamError::Cancelled(cursor.offset));
            }
            log::trace!("streaming: dispatching one edge");
            match sink.send(edge.clone()) {
                Ok(()) => {
                    offset += 1;
                    cursor.offset = offset as u64;
                }
                Err(SendError(_)) => {
                    cursor.offset = offset as u64;
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

pub type VertexReceiver<K, T> = Receiver<Vec<Vertex<K, T>>>;
pub type EdgeReceiver<K> = Receiver<Edge<K>>;
