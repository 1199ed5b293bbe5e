//! Public error type for the `compile`/`run` entry points.
//!
//! Pass-specific errors keep their own types; this enum groups them the way
//! a host usually reports them.

use crate::compiler::CompileError;
use crate::vm::ExecutionError;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The AST could not be translated.
    Compilation(CompileError),

    /// The program failed while running (division by zero, bad frame access,
    /// exhausted input and so on).
    Runtime(ExecutionError),

    /// A configured limit was hit: call depth or step count.
    ResourceExceeded(ExecutionError),
}

impl Error {
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, Error::ResourceExceeded(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Compilation(err) => write!(f, "Compilation failed: {}", err),
            Error::Runtime(err) => write!(f, "Runtime error: {}", err),
            Error::ResourceExceeded(err) => write!(f, "Resource limit exceeded: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Error::Compilation(err)
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::StackOverflow { .. } | ExecutionError::StepLimitExceeded { .. } => {
                Error::ResourceExceeded(err)
            }
            _ => Error::Runtime(err),
        }
    }
}
