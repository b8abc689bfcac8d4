/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or decoding core world data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A grid was requested with a zero side or with more cells than fit in memory.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },

    /// A per-cell buffer does not match the grid it belongs to.
    #[error("buffer length mismatch: expected {expected} cells, got {actual}")]
    LengthMismatch {
        /// Number of cells the grid holds.
        expected: usize,
        /// Length of the offending buffer.
        actual: usize,
    },

    /// A non-canal cell carries a non-zero flow vector.
    #[error("cell {index} has a flow vector but is not a canal")]
    FlowOffCanal {
        /// Row-major index of the offending cell.
        index: usize,
    },

    /// A byte does not name any terrain category.
    #[error("unknown cell kind code: {0}")]
    UnknownCellKind(u8),
}
