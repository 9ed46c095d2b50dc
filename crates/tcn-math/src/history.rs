//! Fixed-capacity ring of the most recent field snapshots.
//!
//! The memory term only ever looks `memory_depth` steps back, so a run keeps
//! this window instead of indexing into the full O(S·N) history.

use ndarray::Array1;
use std::collections::VecDeque;
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::FieldSample;

#[derive(Debug, Clone)]
pub struct HistoryWindow<T> {
    capacity: usize,
    n_points: usize,
    /// Newest snapshot at the front.
    snapshots: VecDeque<Array1<T>>,
}

impl<T: FieldSample> HistoryWindow<T> {
    pub fn new(capacity: usize, n_points: usize) -> TcnResult<Self> {
        if capacity == 0 {
            return Err(TcnError::PreconditionViolation(
                "history window capacity must be >= 1".to_string(),
            ));
        }
        Ok(HistoryWindow {
            capacity,
            n_points,
            snapshots: VecDeque::with_capacity(capacity),
        })
    }

    /// Push the newest snapshot, evicting the oldest once full.
    pub fn push(&mut self, field: Array1<T>) -> TcnResult<()> {
        if field.len() != self.n_points {
            return Err(TcnError::PreconditionViolation(format!(
                "history window holds {}-point fields, got {}",
                self.n_points,
                field.len()
            )));
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_back();
        }
        self.snapshots.push_front(field);
        Ok(())
    }

    pub fn latest(&self) -> Option<&Array1<T>> {
        self.snapshots.front()
    }

    /// Snapshot `lag` steps back; lag 1 is the latest.
    pub fn lagged(&self, lag: usize) -> Option<&Array1<T>> {
        lag.checked_sub(1).and_then(|idx| self.snapshots.get(idx))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }
}
