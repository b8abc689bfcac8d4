use rf_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the solver, the codec, and the orchestrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// An invalid grid or terrain buffer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A cell index past the end of the field.
    #[error("cell {index} is out of bounds for a field of {len} cells")]
    CellOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of cells in the field.
        len: usize,
    },

    /// A snapshot buffer shorter than the grid it claims to cover.
    #[error("snapshot too short: expected {expected} bytes, got {actual}")]
    TruncatedSnapshot {
        /// Number of cells in the grid.
        expected: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// Run-length encoded data that does not decode to a valid snapshot.
    #[error("malformed run-length data: {0}")]
    MalformedRle(String),

    /// A configuration value the simulation cannot run with.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    /// A registered system failed.
    #[error("system error: {0}")]
    SystemError(String),
}
