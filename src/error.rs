use thiserror::Error;

/// Top-level error type for the rotate-and-scale tool.
#[derive(Debug, Error)]
pub enum RotaScaleError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The anchor and the second reference point coincide, so no scale
    /// factor exists. Upstream picking never lets this through.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the in-memory scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to tool operations and their parameters.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`RotaScaleError`].
pub type Result<T> = std::result::Result<T, RotaScaleError>;
