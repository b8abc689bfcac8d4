use rf_core::CoreError;

/// Alias for `Result<T, GenError>`.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that reject a generation request before any work is done.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The requested dimensions or the assembled map were invalid.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A tuning value makes generation impossible.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
}
