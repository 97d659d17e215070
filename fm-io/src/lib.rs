//! # fm-io: Bookshelf-style netlist ingest and result output
//!
//! Reads the three-file Bookshelf-like text format described in spec §6
//! (`.aux` / `.nodes` / `.nets`) into a [`fm_core::CircuitModel`], and writes
//! the two-section partition report (or a single-line infeasibility
//! diagnostic) back out.
//!
//! This crate is thin I/O on purpose: format parsing is the input contract
//! [`fm_algo`](../fm_algo/index.html) consumes, not part of the partitioning
//! core itself.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fm_io::load_circuit;
//!
//! let (circuit, diagnostics) = load_circuit("benchmarks/example2/example2.aux")?;
//! for issue in diagnostics.issues() {
//!     eprintln!("{issue}");
//! }
//! ```

pub mod bookshelf;
pub mod output;

pub use bookshelf::load_circuit;
