//! Partition State (C4): the current A/B assignment, aggregates, and locks.

use std::collections::BTreeMap;

use fm_core::{CellKind, CircuitModel};

use crate::error::PartitionError;
use crate::{Mode, Side};

/// Current partition assignment plus the aggregates it must stay consistent
/// with, and the per-cell lock flags used within a single pass.
#[derive(Debug, Clone)]
pub struct PartitionState {
    side: BTreeMap<String, Side>,
    locked: BTreeMap<String, bool>,
    pub area_a: u64,
    pub area_b: u64,
    pub count_a: u64,
    pub count_b: u64,
    pub total_area: u64,
    pub total_count: u64,
}

/// The weight of a cell under the active [`Mode`]: area in Area mode, 1 in
/// Num mode.
#[inline]
pub fn weight(mode: Mode, cell: &fm_core::Cell) -> u64 {
    match mode {
        Mode::Area => cell.area(),
        Mode::Num => 1,
    }
}

impl PartitionState {
    /// Build the initial assignment per spec §4.4: iterate movable cells in
    /// deterministic (name) order and greedily balance each onto the side
    /// that keeps things even while respecting `cap`, overfilling only if
    /// there is truly no alternative.
    pub fn initialize(circuit: &CircuitModel, mode: Mode, cap: u64) -> Self {
        let mut state = PartitionState {
            side: BTreeMap::new(),
            locked: BTreeMap::new(),
            area_a: 0,
            area_b: 0,
            count_a: 0,
            count_b: 0,
            total_area: 0,
            total_count: 0,
        };

        for cell in circuit.cells().values() {
            if cell.kind != CellKind::Regular {
                continue;
            }
            let w = weight(mode, cell);
            state.total_area += cell.area();
            state.total_count += 1;

            let (weight_a, weight_b) = state.weights(mode);
            let side = if weight_a <= weight_b && weight_a + w <= cap {
                Side::A
            } else if weight_b + w <= cap {
                Side::B
            } else if weight_a + w <= cap {
                Side::A
            } else {
                let slack_a = cap.saturating_sub(weight_a);
                let slack_b = cap.saturating_sub(weight_b);
                if slack_b > slack_a {
                    Side::B
                } else {
                    Side::A
                }
            };

            state.place(&cell.name, side, mode, w);
            state.locked.insert(cell.name.clone(), false);
        }

        state
    }

    fn weights(&self, mode: Mode) -> (u64, u64) {
        match mode {
            Mode::Area => (self.area_a, self.area_b),
            Mode::Num => (self.count_a, self.count_b),
        }
    }

    fn place(&mut self, cell: &str, side: Side, mode: Mode, w: u64) {
        self.side.insert(cell.to_string(), side);
        match (mode, side) {
            (Mode::Area, Side::A) => self.area_a += w,
            (Mode::Area, Side::B) => self.area_b += w,
            (Mode::Num, Side::A) => self.count_a += 1,
            (Mode::Num, Side::B) => self.count_b += 1,
        }
    }

    /// Flip `cell` from its current side to the opposite, updating
    /// aggregates. Panics if `cell` has no recorded side — an internal
    /// invariant violation, not a user-facing condition.
    pub fn flip(&mut self, cell: &str, mode: Mode, w: u64) {
        let from = *self
            .side
            .get(cell)
            .unwrap_or_else(|| panic!("flip of unassigned cell '{cell}'"));
        let to = from.opposite();

        match (mode, from) {
            (Mode::Area, Side::A) => {
                self.area_a -= w;
                self.area_b += w;
            }
            (Mode::Area, Side::B) => {
                self.area_b -= w;
                self.area_a += w;
            }
            (Mode::Num, Side::A) => {
                self.count_a -= 1;
                self.count_b += 1;
            }
            (Mode::Num, Side::B) => {
                self.count_b -= 1;
                self.count_a += 1;
            }
        }
        self.side.insert(cell.to_string(), to);
    }

    pub fn side_of(&self, cell: &str) -> Option<Side> {
        self.side.get(cell).copied()
    }

    pub fn side(&self) -> &BTreeMap<String, Side> {
        &self.side
    }

    pub fn is_locked(&self, cell: &str) -> bool {
        self.locked.get(cell).copied().unwrap_or(false)
    }

    pub fn lock(&mut self, cell: &str) {
        self.locked.insert(cell.to_string(), true);
    }

    /// Clear every lock, as done at the start and end of every pass.
    pub fn clear_locks(&mut self) {
        for v in self.locked.values_mut() {
            *v = false;
        }
    }

    /// Weight currently on `side`, under `mode`.
    pub fn weight_on(&self, side: Side, mode: Mode) -> u64 {
        match (mode, side) {
            (Mode::Area, Side::A) => self.area_a,
            (Mode::Area, Side::B) => self.area_b,
            (Mode::Num, Side::A) => self.count_a,
            (Mode::Num, Side::B) => self.count_b,
        }
    }

    /// Snapshot enough state to restore `side` and the aggregates later.
    pub fn snapshot(&self) -> PartitionSnapshot {
        PartitionSnapshot {
            side: self.side.clone(),
            area_a: self.area_a,
            area_b: self.area_b,
            count_a: self.count_a,
            count_b: self.count_b,
        }
    }

    /// Restore from a snapshot taken by [`PartitionState::snapshot`].
    pub fn restore(&mut self, snapshot: &PartitionSnapshot) {
        self.side = snapshot.side.clone();
        self.area_a = snapshot.area_a;
        self.area_b = snapshot.area_b;
        self.count_a = snapshot.count_a;
        self.count_b = snapshot.count_b;
    }

    /// Feasibility check of spec §4.6: no single movable cell's weight
    /// exceeds `cap`, both initial aggregates are within `cap`, and every
    /// movable cell in `circuit` has a recorded side.
    pub fn check_feasible(&self, circuit: &CircuitModel, mode: Mode, cap: u64) -> Result<(), PartitionError> {
        for cell in circuit.movable_cells() {
            let w = weight(mode, cell);
            if w > cap {
                return Err(PartitionError::CellExceedsCap {
                    cell: cell.name.clone(),
                    weight: w,
                    cap,
                });
            }
            if !self.side.contains_key(&cell.name) {
                return Err(PartitionError::UnassignedCell(cell.name.clone()));
            }
        }

        let (weight_a, weight_b) = self.weights(mode);
        if weight_a > cap {
            return Err(PartitionError::InitialAssignmentExceedsCap {
                side: "A".to_string(),
                weight: weight_a,
                cap,
            });
        }
        if weight_b > cap {
            return Err(PartitionError::InitialAssignmentExceedsCap {
                side: "B".to_string(),
                weight: weight_b,
                cap,
            });
        }

        Ok(())
    }
}

/// A point-in-time copy of [`PartitionState`]'s side map and aggregates,
/// taken at the start of a pass so the pass can be rolled back to its best
/// prefix.
#[derive(Debug, Clone)]
pub struct PartitionSnapshot {
    side: BTreeMap<String, Side>,
    area_a: u64,
    area_b: u64,
    count_a: u64,
    count_b: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::{Cell, Net, Pin};

    fn two_cells_one_net(cap_mode_weight: u32) -> CircuitModel {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", cap_mode_weight, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", cap_mode_weight, 1, CellKind::Regular));
        model.insert_net(Net::new("n1", vec![Pin::new("a", "I"), Pin::new("b", "O")]));
        model
    }

    #[test]
    fn num_mode_balances_two_cells_cap_one() {
        // Scenario 1 from spec §8.
        let model = two_cells_one_net(1);
        let state = PartitionState::initialize(&model, Mode::Num, 1);
        assert_ne!(state.side_of("a"), state.side_of("b"));
        assert_eq!(state.count_a, 1);
        assert_eq!(state.count_b, 1);
    }

    #[test]
    fn area_mode_overfills_when_no_alternative() {
        // Scenario 4 from spec §8: a(10x1), b(10x1), c(1x1), cap=11.
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 10, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", 10, 1, CellKind::Regular));
        model.insert_cell(Cell::new("c", 1, 1, CellKind::Regular));
        model.insert_net(Net::new(
            "n1",
            vec![Pin::new("a", "I"), Pin::new("b", "I"), Pin::new("c", "O")],
        ));
        let state = PartitionState::initialize(&model, Mode::Area, 11);
        assert_eq!(state.side_of("a"), Some(Side::A));
        assert_eq!(state.side_of("b"), Some(Side::B));
        assert_eq!(state.side_of("c"), Some(Side::A));
        assert_eq!(state.area_a, 11);
        assert_eq!(state.area_b, 10);
    }

    #[test]
    fn feasibility_rejects_oversized_cell() {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("big", 100, 1, CellKind::Regular));
        let state = PartitionState::initialize(&model, Mode::Area, 50);
        assert!(state.check_feasible(&model, Mode::Area, 50).is_err());
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let model = two_cells_one_net(1);
        let mut state = PartitionState::initialize(&model, Mode::Num, 1);
        let snap = state.snapshot();
        state.flip("a", Mode::Num, 1);
        assert_ne!(state.snapshot().side, snap.side);
        state.restore(&snap);
        assert_eq!(state.side_of("a"), snap.side.get("a").copied());
    }
}
