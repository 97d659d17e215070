//! Driver (C7): repeat FM passes while the cut improves.

use std::collections::BTreeMap;

use fm_core::CircuitModel;
use tracing::info;

use crate::adjacency::AdjacencyIndex;
use crate::error::PartitionError;
use crate::fm_pass::run_one_pass;
use crate::gain::GainState;
use crate::partition_state::PartitionState;
use crate::{calculate_cut, Mode, Side};

/// The final outcome of a complete partitioning run.
#[derive(Debug, Clone)]
pub struct PartitionResult {
    pub side: BTreeMap<String, Side>,
    pub cut_size: usize,
    pub passes_run: usize,
}

/// Run the FM partitioner to completion: build the adjacency index, the
/// initial partition and gain state, verify feasibility, then loop
/// `run_one_pass` while the cut strictly decreases (spec §4.7).
///
/// Termination is guaranteed: each iteration either strictly decreases a
/// non-negative integer (the cut size) or the loop exits.
pub fn run(circuit: &CircuitModel, mode: Mode, cap: u64) -> Result<PartitionResult, PartitionError> {
    let adjacency = AdjacencyIndex::build(circuit);
    let mut partition = PartitionState::initialize(circuit, mode, cap);
    partition.check_feasible(circuit, mode, cap)?;

    let mut gain = GainState::compute_initial(&adjacency, &partition);

    let mut prev_cut = calculate_cut(circuit, partition.side());
    info!(cut = prev_cut, "initial cut size");

    let mut passes_run = 0usize;
    loop {
        let report = run_one_pass(circuit, &adjacency, mode, cap, &mut partition, &mut gain);
        passes_run += 1;
        info!(
            pass = passes_run,
            cut_before = report.cut_before,
            cut_after = report.cut_after,
            moves = report.moves_committed,
            "pass complete"
        );

        // Gain bucket must be rebuilt from the post-pass side assignment
        // before the next pass can select moves against it again.
        gain = GainState::compute_initial(&adjacency, &partition);

        let new_cut = calculate_cut(circuit, partition.side());
        if new_cut < prev_cut {
            prev_cut = new_cut;
            continue;
        }
        break;
    }

    Ok(PartitionResult {
        side: partition.side().clone(),
        cut_size: prev_cut,
        passes_run,
    })
}
