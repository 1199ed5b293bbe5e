//! Configuration options for compiling and running programs.

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use stackc_core::api::CompilationOptions;
///
/// let options = CompilationOptions { tail_calls: false };
/// ```
#[derive(Debug, Clone)]
pub struct CompilationOptions {
    /// Run the tail-call rewriter on the translated program.
    ///
    /// Default: true
    pub tail_calls: bool,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self { tail_calls: true }
    }
}

/// Resource limits for the reference machine.
///
/// # Example
///
/// ```
/// use stackc_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     max_call_depth: 500,
///     max_steps: Some(10_000),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum number of simultaneously active calls, the call to `main`
    /// included.
    ///
    /// Default: 1000
    pub max_call_depth: usize,

    /// Maximum number of executed instructions (if Some).
    ///
    /// Set to `None` for unlimited execution (be careful with untrusted code!).
    ///
    /// Default: None
    pub max_steps: Option<usize>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
            max_steps: None,
        }
    }
}
