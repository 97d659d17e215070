//! # fm-algo: the Fiduccia–Mattheyses partitioner
//!
//! Two-way min-cut hypergraph partitioning of a [`fm_core::CircuitModel`]
//! under a per-partition capacity bound, via the Fiduccia–Mattheyses (FM)
//! iterative-improvement heuristic.
//!
//! ## Pipeline
//!
//! | Stage | Type | Responsibility |
//! |-------|------|-----------------|
//! | C3 | [`adjacency::AdjacencyIndex`] | Derived cell↔net incidence, built once. |
//! | C4 | [`partition_state::PartitionState`] | Current A/B sides, aggregates, locks. |
//! | C5 | [`gain::GainState`] | Gain values and the max-gain bucket. |
//! | C6 | [`fm_pass::run_one_pass`] | One FM pass: select, move, update, roll back. |
//! | C7 | [`driver::run`] | Repeat passes while the cut improves. |
//!
//! ```ignore
//! use fm_algo::{driver, Mode};
//!
//! let result = driver::run(&circuit, Mode::Area, 1000)?;
//! println!("final cut: {}", result.cut_size);
//! ```
//!
//! ## Determinism
//!
//! All state is kept in `BTreeMap`/`BTreeSet`, never a hash-based container,
//! so that cell/net/bucket iteration order — and therefore which cell is
//! picked among equal-gain ties — is reproducible across runs on identical
//! input (spec §5, §9).

use serde::{Deserialize, Serialize};

pub mod adjacency;
pub mod driver;
pub mod error;
pub mod fm_pass;
pub mod gain;
pub mod partition_state;

pub use adjacency::AdjacencyIndex;
pub use driver::{run, PartitionResult};
pub use error::PartitionError;
pub use gain::GainState;
pub use partition_state::PartitionState;

/// Which quantity the capacity bound is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// `cap` bounds the summed cell area per partition.
    Area,
    /// `cap` bounds the cell count per partition.
    Num,
}

/// Which side of the partition a movable cell currently sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Compute the cut size of the given side assignment.
///
/// For each net, collect the set of sides occupied by cells of that net
/// which currently have a side (terminals, absent from `side`, contribute
/// nothing). A net counts toward the cut iff that set has size ≥ 2.
pub fn calculate_cut(
    circuit: &fm_core::CircuitModel,
    side: &std::collections::BTreeMap<String, Side>,
) -> usize {
    let mut cut = 0;
    for net in circuit.nets().values() {
        let mut sides_seen = (false, false);
        for pin in &net.pins {
            match side.get(&pin.cell) {
                Some(Side::A) => sides_seen.0 = true,
                Some(Side::B) => sides_seen.1 = true,
                None => {}
            }
        }
        if sides_seen.0 && sides_seen.1 {
            cut += 1;
        }
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::{Cell, CellKind, CircuitModel, Net, Pin};
    use std::collections::BTreeMap;

    #[test]
    fn opposite_side_round_trips() {
        assert_eq!(Side::A.opposite(), Side::B);
        assert_eq!(Side::B.opposite().opposite(), Side::B);
    }

    #[test]
    fn cut_ignores_terminals_absent_from_side() {
        // Scenario 3 from spec §8: terminal anchoring.
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("t1", 1, 1, CellKind::Terminal));
        model.insert_cell(Cell::new("x", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("y", 1, 1, CellKind::Regular));
        model.insert_net(Net::new("n1", vec![Pin::new("t1", "I"), Pin::new("x", "O")]));
        model.insert_net(Net::new("n2", vec![Pin::new("t1", "I"), Pin::new("y", "O")]));

        let mut side = BTreeMap::new();
        side.insert("x".to_string(), Side::A);
        side.insert("y".to_string(), Side::B);

        assert_eq!(calculate_cut(&model, &side), 0);
    }

    #[test]
    fn cut_counts_nets_spanning_both_sides() {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", 1, 1, CellKind::Regular));
        model.insert_net(Net::new("n1", vec![Pin::new("a", "I"), Pin::new("b", "O")]));

        let mut side = BTreeMap::new();
        side.insert("a".to_string(), Side::A);
        side.insert("b".to_string(), Side::B);

        assert_eq!(calculate_cut(&model, &side), 1);
    }
}
