//! Unified error type for the fm-* workspace.
//!
//! This module provides a common error type [`FmError`] shared across
//! `fm-io`, `fm-algo`, and `fm-cli`, so that I/O, parsing, and partitioning
//! failures all flow through one `?`-composable type at crate boundaries.
//!
//! # Example
//!
//! ```ignore
//! use fm_core::{FmError, FmResult};
//!
//! fn load_and_partition(path: &str) -> FmResult<()> {
//!     let (circuit, _diag) = fm_io::load_circuit(path)?;
//!     // ...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all fm-* operations.
///
/// Each variant corresponds to one of the error *kinds* named in spec §7:
/// ingest failures are fatal and surfaced as-is; [`FmError::Infeasible`] is
/// raised by the feasibility check before any pass runs; output failures
/// wrap the underlying I/O error.
#[derive(Error, Debug)]
pub enum FmError {
    /// The `.aux` file, or a file it names, could not be found or opened.
    #[error("input not found: {0}")]
    InputNotFound(String),

    /// A `.aux`/`.nodes`/`.nets` file was present but did not parse.
    #[error("input malformed: {0}")]
    InputMalformed(String),

    /// The initial partition cannot satisfy the capacity bound.
    #[error("infeasible partition: {0}")]
    Infeasible(String),

    /// The partition result (or diagnostic) could not be written.
    #[error("output write failed: {0}")]
    OutputWriteFailed(String),

    /// I/O errors not otherwise classified above.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result`s using [`FmError`].
pub type FmResult<T> = Result<T, FmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = FmError::Infeasible("cell big exceeds cap".into());
        assert!(err.to_string().contains("infeasible"));
        assert!(err.to_string().contains("cell big exceeds cap"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "nope");
        let fm_err: FmError = io_err.into();
        assert!(matches!(fm_err, FmError::Io(_)));
    }

    #[test]
    fn question_mark_composes() {
        fn inner() -> FmResult<()> {
            Err(FmError::InputMalformed("bad line".into()))
        }
        fn outer() -> FmResult<()> {
            inner()?;
            Ok(())
        }
        assert!(outer().is_err());
    }
}
