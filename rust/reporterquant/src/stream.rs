use crate::models::QuantMatch;
use std::sync::{
    Arc,
    Mutex,
};

/// A single-pass source of identification matches shared by all collector
/// threads.
///
/// `next_match` must be callable concurrently; each match is handed out
/// exactly once. Exhaustion is signalled with `None`.
pub trait MatchStream: Send + Sync {
    fn next_match(&self) -> Option<Arc<QuantMatch>>;

    /// Total number of matches, when known. Used for progress sizing only.
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

/// In-memory match source with a mutex-guarded cursor.
///
/// The lock is held only to advance the index, so contention stays low even
/// with many collectors pulling from the same stream.
pub struct SliceMatchStream {
    items: Vec<Arc<QuantMatch>>,
    cursor: Mutex<usize>,
}

impl SliceMatchStream {
    pub fn new(items: Vec<Arc<QuantMatch>>) -> Self {
        Self {
            items,
            cursor: Mutex::new(0),
        }
    }
}

impl MatchStream for SliceMatchStream {
    fn next_match(&self) -> Option<Arc<QuantMatch>> {
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        let idx = *cursor;
        if idx >= self.items.len() {
            return None;
        }
        *cursor += 1;
        Some(self.items[idx].clone())
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}
