//! Status taxonomy shared by every fallible operation.

use std::fmt;

/// Boundary status codes. Discriminants are part of the interop contract.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok = 0,
    InvalidArgument = 1,
    FailedPrecondition = 2,
    OutOfRange = 3,
    Internal = 4,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Malformed parameters or malformed / out-of-order input.
    InvalidArgument(String),
    /// The operation is not valid in the current session state.
    FailedPrecondition(&'static str),
    /// Buffer or index bounds.
    OutOfRange(String),
    /// A numerical or invariant failure; indicates a defect.
    Internal(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    pub fn code(&self) -> StatusCode {
        match self {
            ModelError::InvalidArgument(_) => StatusCode::InvalidArgument,
            ModelError::FailedPrecondition(_) => StatusCode::FailedPrecondition,
            ModelError::OutOfRange(_) => StatusCode::OutOfRange,
            ModelError::Internal(_) => StatusCode::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ModelError::InvalidArgument(message)
            | ModelError::OutOfRange(message)
            | ModelError::Internal(message) => message,
            ModelError::FailedPrecondition(message) => message,
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            ModelError::FailedPrecondition(message) => {
                write!(f, "failed precondition: {message}")
            }
            ModelError::OutOfRange(message) => write!(f, "out of range: {message}"),
            ModelError::Internal(message) => write!(f, "internal: {message}"),
        }
    }
}

impl std::error::Error for ModelError {}

/// Collapses a result into its boundary status code.
pub fn status_of<T>(result: &ModelResult<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::Ok,
        Err(error) => error.code(),
    }
}
