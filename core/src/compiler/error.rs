//! Translation errors.

use thiserror::Error;

use crate::String;

/// Errors that can occur during translation.
///
/// Every variant is fatal: translation stops at the first error and no
/// instruction sequence is produced. Variable errors are reported as soon as
/// the offending node is reached; function errors are only known once every
/// function has been emitted and call sites are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A reference, assignment or `read` names a variable that is neither a
    /// parameter nor a declared local of the enclosing function.
    #[error("unknown variable '{name}' in function '{function}'")]
    UndeclaredVariable { name: String, function: String },

    /// A parameter or local reuses a name already bound in the same function.
    #[error("variable '{name}' is already defined in function '{function}'")]
    DuplicateDeclaration { name: String, function: String },

    /// A call names a function that does not exist.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// A call passes a different number of arguments than the callee declares.
    #[error("function '{name}' expects {expected} arguments, found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Two functions share a name, which makes call resolution ambiguous.
    #[error("function '{name}' is defined more than once")]
    DuplicateFunction { name: String },

    #[error("{0}")]
    MalformedMain(MainError),
}

/// Why the program's `main` function is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MainError {
    #[error("main function is missing")]
    Missing,

    #[error("main function must not have parameters (found {count})")]
    HasParameters { count: usize },
}

impl From<MainError> for CompileError {
    fn from(error: MainError) -> Self {
        CompileError::MalformedMain(error)
    }
}
