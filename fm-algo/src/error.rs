//! Error type for partitioning operations.

use thiserror::Error;

/// Error type for the FM partitioner.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// A single movable cell's weight exceeds the capacity bound on its own;
    /// no initial assignment can respect `cap`.
    #[error("cell '{cell}' has weight {weight} which exceeds cap {cap}")]
    CellExceedsCap {
        cell: String,
        weight: u64,
        cap: u64,
    },

    /// The greedy initial assignment overfilled one side beyond `cap`.
    #[error("initial partition infeasible: side {side} has weight {weight}, cap {cap}")]
    InitialAssignmentExceedsCap {
        side: String,
        weight: u64,
        cap: u64,
    },

    /// A movable cell never received a side during initialization.
    #[error("cell '{0}' is movable but was never assigned a side")]
    UnassignedCell(String),
}

impl From<PartitionError> for fm_core::FmError {
    fn from(err: PartitionError) -> Self {
        fm_core::FmError::Infeasible(err.to_string())
    }
}
