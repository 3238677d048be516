/// Errors raised by rotation conversions and decompositions.
///
/// Degenerate configurations (zero rotation angle, gimbal lock) are not errors;
/// they are resolved inside the conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RotationError {
    /// Wrong matrix shape, unknown Euler sequence, empty input list and the like.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A matrix decomposition did not converge, or was given non-finite input.
    #[error("numerical failure: {0}")]
    NumericalFailure(String),
}

pub type Result<T, E = RotationError> = std::result::Result<T, E>;

impl RotationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn numerical(msg: impl Into<String>) -> Self {
        Self::NumericalFailure(msg.into())
    }
}
