//! # fm-core: Circuit Model for Hypergraph Partitioning
//!
//! Provides the fundamental data structures for two-way min-cut hypergraph
//! partitioning of a circuit netlist: cells (hypergraph nodes, carrying width,
//! height, and a movability kind) and nets (hyperedges over cells).
//!
//! ## Design Philosophy
//!
//! A netlist is modeled as a **bipartite incidence structure** between cells
//! and nets, not a graph in the pairwise-edge sense: a net connects an
//! arbitrary subset of cells (a hyperedge), and that is exactly what the FM
//! algorithm operates over. [`fm_algo`](../fm_algo/index.html) derives the
//! cell↔net adjacency once the model is built; this crate only owns the
//! immutable post-ingest representation.
//!
//! ## Quick Start
//!
//! ```
//! use fm_core::{Cell, CellKind, CircuitModel, Net, Pin};
//!
//! let mut model = CircuitModel::new();
//! model.insert_cell(Cell::new("a", 1, 1, CellKind::Regular));
//! model.insert_cell(Cell::new("b", 1, 1, CellKind::Regular));
//! model.insert_net(Net::new(
//!     "n1",
//!     vec![Pin::new("a", "I"), Pin::new("b", "O")],
//! ));
//!
//! assert_eq!(model.cells().len(), 2);
//! assert_eq!(model.nets().len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`error`] — the shared [`FmError`]/[`FmResult`] used across the
//!   workspace.
//! - [`diagnostics`] — non-fatal issue collection for the ingest layer.
//!
//! ## Integration with fm-io and fm-algo
//!
//! `fm-io` constructs a [`CircuitModel`] from the Bookshelf-style `.aux`/
//! `.nodes`/`.nets` text files. `fm-algo` consumes the finished model and
//! never mutates it: the Circuit Model is built once and is read-only for
//! the rest of a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod diagnostics;
pub mod error;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{FmError, FmResult};

/// What a cell *is* for partitioning purposes.
///
/// Only [`CellKind::Regular`] cells are movable. Terminals (fixed I/O pads)
/// and non-interfering terminals still contribute pins to nets and so still
/// affect cut evaluation, but never occupy a side and are never selected by
/// the FM pass controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// An ordinary movable gate/cell.
    Regular,
    /// A fixed pad that still counts toward cut evaluation.
    Terminal,
    /// A fixed, non-interfering pad (same cut treatment as `Terminal` here).
    TerminalNI,
}

/// A circuit cell: a hypergraph node with physical extent and a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub kind: CellKind,
}

impl Cell {
    pub fn new(name: impl Into<String>, width: u32, height: u32, kind: CellKind) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            kind,
        }
    }

    /// Area, the weight used in Area-mode capacity checks.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True iff this cell is assigned a side and participates in gain
    /// computation — i.e. `kind == Regular`.
    ///
    /// Note: the source this system was grounded on marks both `Regular`
    /// and `Terminal` cells as "movable" via one shared helper, but its
    /// partitioning pass only ever inserts `Regular` cells into the side
    /// map and gain bucket. This method reflects that effective behavior,
    /// not the looser helper — see spec Open Question / DESIGN.md.
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.kind == CellKind::Regular
    }
}

/// A single pin of a net: which cell, and its declared direction.
///
/// Direction is preserved for fidelity with the input format but is never
/// consulted by the partitioning core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub cell: String,
    pub direction: String,
}

impl Pin {
    pub fn new(cell: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            cell: cell.into(),
            direction: direction.into(),
        }
    }
}

/// A net (hyperedge): an ordered list of pins, duplicates preserved.
///
/// The input format may repeat a cell within the same net; this is not
/// deduplicated, since gain and cut computations are specified to be
/// sensitive to duplicate pins (spec §9).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    pub pins: Vec<Pin>,
}

impl Net {
    pub fn new(name: impl Into<String>, pins: Vec<Pin>) -> Self {
        Self {
            name: name.into(),
            pins,
        }
    }
}

/// Immutable, post-ingest representation of a circuit: all cells and nets.
///
/// Built once by `fm-io` and never mutated afterward; the FM pass controller
/// borrows it read-only for the lifetime of a run. Duplicate cell or net
/// names follow last-write-wins on insert (see [`CircuitModel::insert_cell`]
/// / [`CircuitModel::insert_net`]) — the ingest layer is responsible for
/// surfacing a diagnostic if that matters to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitModel {
    cells: BTreeMap<String, Cell>,
    nets: BTreeMap<String, Net>,
}

impl CircuitModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a cell by name (last-write-wins).
    pub fn insert_cell(&mut self, cell: Cell) {
        self.cells.insert(cell.name.clone(), cell);
    }

    /// Insert or overwrite a net by name (last-write-wins).
    pub fn insert_net(&mut self, net: Net) {
        self.nets.insert(net.name.clone(), net);
    }

    /// All cells, keyed by name, in deterministic (name-sorted) order.
    pub fn cells(&self) -> &BTreeMap<String, Cell> {
        &self.cells
    }

    /// All nets, keyed by name, in deterministic (name-sorted) order.
    pub fn nets(&self) -> &BTreeMap<String, Net> {
        &self.nets
    }

    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.get(name)
    }

    /// Iterator over movable (`Regular`) cells, in name order.
    pub fn movable_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values().filter(|c| c.is_movable())
    }
}
