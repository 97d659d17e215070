//! FM Pass Controller (C6): one sweep of tentative moves with best-prefix
//! rollback.
//!
//! A pass accepts negative-gain moves speculatively so the search can cross
//! a local maximum in the gain surface; only the prefix of moves that
//! achieved the lowest cut seen during the pass is kept. See spec §4.6.

use fm_core::CircuitModel;
use tracing::debug;

use crate::adjacency::AdjacencyIndex;
use crate::gain::GainState;
use crate::partition_state::{weight, PartitionState};
use crate::{calculate_cut, Mode};

/// Outcome of a single pass: how many moves were committed and the cut size
/// after committing them.
#[derive(Debug, Clone, Copy)]
pub struct PassReport {
    pub cut_before: usize,
    pub cut_after: usize,
    pub moves_committed: usize,
}

/// Run exactly one FM pass over `partition`, mutating it and `gain` in
/// place. Steps follow spec §4.6:
///
/// 1. Snapshot, clear locks, record `best_cut`/`moves_to_best`.
/// 2. Repeatedly pop the max-gain unlocked feasible cell, flip it, update
///    neighbor gains, and track whether the cut improved.
/// 3. Roll back to the snapshot and replay only the best prefix of moves.
/// 4. Clear locks again.
pub fn run_one_pass(
    circuit: &CircuitModel,
    adjacency: &AdjacencyIndex,
    mode: Mode,
    cap: u64,
    partition: &mut PartitionState,
    gain: &mut GainState,
) -> PassReport {
    partition.clear_locks();
    let snapshot = partition.snapshot();

    let cut_before = calculate_cut(circuit, partition.side());
    let mut best_cut = cut_before;
    let mut moves_to_best = 0usize;
    let mut move_seq: Vec<String> = Vec::new();

    let movable_count = partition.side().len();

    while !gain.is_empty() && move_seq.len() < movable_count {
        let (g, cell) = match gain.pop_max() {
            Some(entry) => entry,
            None => break,
        };

        if partition.is_locked(&cell) {
            continue;
        }

        let from = match partition.side_of(&cell) {
            Some(s) => s,
            None => continue,
        };
        let to = from.opposite();
        let w = circuit
            .cell(&cell)
            .map(|c| weight(mode, c))
            .unwrap_or_default();

        if partition.weight_on(to, mode) + w > cap {
            // Strict-cap FM: an infeasible move is skipped, not re-inserted
            // at a different gain, and not retried this pass.
            debug!(cell = %cell, gain = g, "skipped move: would exceed cap");
            continue;
        }

        partition.flip(&cell, mode, w);
        partition.lock(&cell);

        for neighbor in adjacency.neighbors_of(&cell) {
            if !partition.is_locked(&neighbor) {
                gain.update(adjacency, partition, &neighbor);
            }
        }
        move_seq.push(cell);
        let current_cut = calculate_cut(circuit, partition.side());
        if current_cut < best_cut {
            best_cut = current_cut;
            moves_to_best = move_seq.len();
        }
    }

    partition.restore(&snapshot);
    for cell in move_seq.iter().take(moves_to_best) {
        let w = circuit
            .cell(cell)
            .map(|c| weight(mode, c))
            .unwrap_or_default();
        partition.flip(cell, mode, w);
    }

    partition.clear_locks();

    let cut_after = calculate_cut(circuit, partition.side());
    debug_assert_eq!(cut_after, best_cut, "rollback must reproduce best_cut exactly");

    PassReport {
        cut_before,
        cut_after,
        moves_committed: moves_to_best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::{Cell, CellKind, CircuitModel, Net, Pin};

    fn build(circuit: &CircuitModel, mode: Mode, cap: u64) -> (AdjacencyIndex, PartitionState, GainState) {
        let adjacency = AdjacencyIndex::build(circuit);
        let partition = PartitionState::initialize(circuit, mode, cap);
        let gain = GainState::compute_initial(&adjacency, &partition);
        (adjacency, partition, gain)
    }

    #[test]
    fn pass_never_increases_cut() {
        // Scenario 2 from spec §8.
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("c", 1, 1, CellKind::Regular));
        model.insert_net(Net::new(
            "n1",
            vec![Pin::new("a", "I"), Pin::new("b", "I"), Pin::new("c", "O")],
        ));
        let (adjacency, mut partition, mut gain) = build(&model, Mode::Num, 2);
        let report = run_one_pass(&model, &adjacency, Mode::Num, 2, &mut partition, &mut gain);
        assert!(report.cut_after <= report.cut_before);
    }

    #[test]
    fn rollback_never_violates_cap() {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 10, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", 10, 1, CellKind::Regular));
        model.insert_cell(Cell::new("c", 1, 1, CellKind::Regular));
        model.insert_net(Net::new(
            "n1",
            vec![Pin::new("a", "I"), Pin::new("b", "I"), Pin::new("c", "O")],
        ));
        let (adjacency, mut partition, mut gain) = build(&model, Mode::Area, 11);
        run_one_pass(&model, &adjacency, Mode::Area, 11, &mut partition, &mut gain);
        assert!(partition.area_a <= 11);
        assert!(partition.area_b <= 11);
    }

    // Scenario 5 from spec §8 (rollback chooses the best prefix on a richer
    // instance where the cut briefly worsens before improving) lives in
    // `tests/scenarios.rs`, alongside the other spec §8 literal fixtures.

    #[test]
    fn locks_are_cleared_after_pass() {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", 1, 1, CellKind::Regular));
        model.insert_net(Net::new("n1", vec![Pin::new("a", "I"), Pin::new("b", "O")]));
        let (adjacency, mut partition, mut gain) = build(&model, Mode::Num, 1);
        run_one_pass(&model, &adjacency, Mode::Num, 1, &mut partition, &mut gain);
        assert!(!partition.is_locked("a"));
        assert!(!partition.is_locked("b"));
    }
}
