//! Error types for planum operations.

use thiserror::Error;

/// Errors that can occur during geometric computations.
///
/// All failures are computed, never environmental: the engine performs no
/// I/O. Degenerate geometry (collinear triples) is reported through sentinel
/// values such as [`circumcircle`](crate::predicates::circumcircle) returning
/// `None`, not through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The operation needs more points than were supplied.
    #[error("insufficient points: need at least {needed}, got {got}")]
    InsufficientPoints {
        /// Minimum number of points the operation requires.
        needed: usize,
        /// Number of points actually supplied.
        got: usize,
    },
}
