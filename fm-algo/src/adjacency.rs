//! Adjacency Index (C3): the derived cell↔net incidence mapping.
//!
//! Built once from a [`fm_core::CircuitModel`] and treated as read-only for
//! the rest of a run (spec invariant 5). Two maps, asymmetric on purpose:
//!
//! - `cell_nets[c]` only ever lists nets for *movable* (`Regular`) cells,
//!   since terminals never get selected by the FM pass and so never need
//!   their neighbor nets looked up.
//! - `net_cells[n]` lists every cell of the net, movable or not, because
//!   [`crate::calculate_cut`] and the gain formula both need to see
//!   terminals occupying pins even though terminals never occupy a side.

use std::collections::BTreeMap;

use fm_core::CircuitModel;

/// Derived cell↔net adjacency, built once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    cell_nets: BTreeMap<String, Vec<String>>,
    net_cells: BTreeMap<String, Vec<String>>,
}

impl AdjacencyIndex {
    /// Walk every (net, pin) pair once and build both maps.
    pub fn build(circuit: &CircuitModel) -> Self {
        let mut cell_nets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut net_cells: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for cell in circuit.movable_cells() {
            cell_nets.entry(cell.name.clone()).or_default();
        }

        for net in circuit.nets().values() {
            let entry = net_cells.entry(net.name.clone()).or_default();
            for pin in &net.pins {
                entry.push(pin.cell.clone());
                if let Some(cell) = circuit.cell(&pin.cell) {
                    if cell.is_movable() {
                        cell_nets
                            .entry(pin.cell.clone())
                            .or_default()
                            .push(net.name.clone());
                    }
                }
            }
        }

        Self {
            cell_nets,
            net_cells,
        }
    }

    /// The nets touching movable cell `c`, or an empty slice if `c` is not
    /// movable or unknown.
    pub fn nets_of(&self, cell: &str) -> &[String] {
        self.cell_nets.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every cell of net `n` (movable or terminal), duplicates preserved.
    pub fn cells_of(&self, net: &str) -> &[String] {
        self.net_cells.get(net).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Movable neighbors of `cell`: the union of movable cells sharing any
    /// net with it, excluding `cell` itself.
    pub fn neighbors_of(&self, cell: &str) -> Vec<String> {
        let mut seen = std::collections::BTreeSet::new();
        for net in self.nets_of(cell) {
            for other in self.cells_of(net) {
                if other != cell && self.cell_nets.contains_key(other) {
                    seen.insert(other.clone());
                }
            }
        }
        seen.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::{Cell, CellKind, Net, Pin};

    fn sample() -> CircuitModel {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("b", 1, 1, CellKind::Regular));
        model.insert_cell(Cell::new("t1", 1, 1, CellKind::Terminal));
        model.insert_net(Net::new(
            "n1",
            vec![Pin::new("a", "I"), Pin::new("b", "O"), Pin::new("t1", "B")],
        ));
        model
    }

    #[test]
    fn cell_nets_excludes_terminals() {
        let idx = AdjacencyIndex::build(&sample());
        assert_eq!(idx.nets_of("a"), &["n1".to_string()]);
        assert!(idx.nets_of("t1").is_empty());
    }

    #[test]
    fn net_cells_includes_terminals() {
        let idx = AdjacencyIndex::build(&sample());
        assert_eq!(idx.cells_of("n1").len(), 3);
        assert!(idx.cells_of("n1").iter().any(|c| c == "t1"));
    }

    #[test]
    fn neighbors_are_movable_only() {
        let idx = AdjacencyIndex::build(&sample());
        assert_eq!(idx.neighbors_of("a"), vec!["b".to_string()]);
    }

    #[test]
    fn duplicate_pins_are_preserved() {
        let mut model = CircuitModel::new();
        model.insert_cell(Cell::new("a", 1, 1, CellKind::Regular));
        model.insert_net(Net::new(
            "n1",
            vec![Pin::new("a", "I"), Pin::new("a", "O")],
        ));
        let idx = AdjacencyIndex::build(&model);
        assert_eq!(idx.cells_of("n1").len(), 2);
        assert_eq!(idx.nets_of("a").len(), 2);
    }
}
