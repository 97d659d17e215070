//! Gain Engine (C5): per-cell FM gain and the max-gain bucket.
//!
//! Gain of flipping movable cell `c` from side `F` to side `T`:
//!
//! ```text
//! gain(c) = sum over nets n containing c of
//!             (+1 if F_count(n) == 1)   // moving c would uncut n
//!           + (-1 if T_count(n) == 0)   // moving c would newly cut n
//! ```
//!
//! `F_count`/`T_count` are obtained by scanning every cell of `n` (via the
//! adjacency index, which retains terminals) and consulting the side map —
//! terminals are simply absent from the side map, so they contribute to
//! neither count. This is the terminal semantic spec §9 calls out explicitly
//! as the one this system implements.

use std::collections::{BTreeMap, BTreeSet};

use crate::adjacency::AdjacencyIndex;
use crate::partition_state::PartitionState;
use crate::Side;

/// Per-cell gain values plus the gain→cell-set bucket used to pick the next
/// move. The bucket must support O(log n) max-key access and O(log n)
/// removal by cell name; a `BTreeMap<i64, BTreeSet<String>>` gives both, and
/// keeps iteration within a gain tier in deterministic name order.
#[derive(Debug, Clone, Default)]
pub struct GainState {
    gain: BTreeMap<String, i64>,
    bucket: BTreeMap<i64, BTreeSet<String>>,
}

impl GainState {
    /// Compute the gain formula for a single movable cell against the
    /// current side assignment.
    pub fn compute_gain(adjacency: &AdjacencyIndex, partition: &PartitionState, cell: &str) -> i64 {
        let from = match partition.side_of(cell) {
            Some(s) => s,
            None => return 0,
        };
        let to = from.opposite();

        let mut gain = 0i64;
        for net in adjacency.nets_of(cell) {
            let (mut from_count, mut to_count) = (0u32, 0u32);
            for other in adjacency.cells_of(net) {
                match partition.side_of(other) {
                    Some(s) if s == from => from_count += 1,
                    Some(s) if s == to => to_count += 1,
                    _ => {}
                }
            }
            if from_count == 1 {
                gain += 1;
            }
            if to_count == 0 {
                gain -= 1;
            }
        }
        gain
    }

    /// Evaluate the gain formula for every movable cell and seed the
    /// bucket. Called once at the start of a run; never needed mid-pass
    /// since moves only trigger incremental neighbor updates.
    pub fn compute_initial(adjacency: &AdjacencyIndex, partition: &PartitionState) -> Self {
        let mut state = GainState::default();
        for cell in partition.side().keys() {
            let g = Self::compute_gain(adjacency, partition, cell);
            state.insert(cell.clone(), g);
        }
        state
    }

    fn insert(&mut self, cell: String, g: i64) {
        self.bucket.entry(g).or_default().insert(cell.clone());
        self.gain.insert(cell, g);
    }

    fn remove(&mut self, cell: &str) {
        if let Some(old) = self.gain.remove(cell) {
            if let Some(set) = self.bucket.get_mut(&old) {
                set.remove(cell);
                if set.is_empty() {
                    self.bucket.remove(&old);
                }
            }
        }
    }

    /// Recompute and reinsert the gain of `cell` after a neighbor moved.
    pub fn update(&mut self, adjacency: &AdjacencyIndex, partition: &PartitionState, cell: &str) {
        self.remove(cell);
        let g = Self::compute_gain(adjacency, partition, cell);
        self.insert(cell.to_string(), g);
    }

    pub fn gain_of(&self, cell: &str) -> Option<i64> {
        self.gain.get(cell).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.bucket.is_empty()
    }

    /// Pop one cell from the highest-gain tier, dropping the tier if it
    /// becomes empty. Returns `None` once the bucket is exhausted.
    pub fn pop_max(&mut self) -> Option<(i64, String)> {
        let max_key = *self.bucket.keys().next_back()?;
        let set = self.bucket.get_mut(&max_key)?;
        let cell = set.iter().next().cloned()?;
        set.remove(&cell);
        if set.is_empty() {
            self.bucket.remove(&max_key);
        }
        self.gain.remove(&cell);
        Some((max_key, cell))
    }

    /// Remove a cell from the bucket without touching `gain` — used by the
    /// pass controller to drop a locked cell it popped but will not move.
    pub fn remove_from_bucket_only(&mut self, gain_value: i64, cell: &str) {
        if let Some(set) = self.bucket.get_mut(&gain_value) {
            set.remove(cell);
            if set.is_empty() {
                self.bucket.remove(&gain_value);
            }
        }
    }
}
