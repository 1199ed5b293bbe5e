//! Entry points for hosts.
//!
//! [`compile`] translates an AST and, unless disabled, rewrites tail calls.
//! [`run`] executes the result on the reference machine.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use stackc_core::api::{self, CompilationOptions, ExecutionOptions};
//! use stackc_core::ast::{AstBuilder, BinaryOp};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let main = b.function(
//!     "main",
//!     &[],
//!     &[],
//!     &[b.write(b.binary(BinaryOp::Mul, b.num(6), b.num(7))), b.ret(b.num(0))],
//! );
//! let program = b.program(&[main]);
//!
//! let code = api::compile(&program, &CompilationOptions::default()).unwrap();
//! let execution = api::run(&code, &[], ExecutionOptions::default()).unwrap();
//! assert_eq!(execution.output, vec![42]);
//! ```

pub mod error;
pub mod options;

pub use error::Error;
pub use options::{CompilationOptions, ExecutionOptions};

use crate::ast::Program;
use crate::compiler;
use crate::optimizer;
use crate::vm::{Code, Execution, VM};

/// Translate `program` and apply the enabled rewrites.
pub fn compile(program: &Program<'_>, options: &CompilationOptions) -> Result<Code, Error> {
    let code = compiler::translate(program)?;
    tracing::debug!(
        functions = program.functions.len(),
        instructions = code.len(),
        "translated program"
    );
    if options.tail_calls {
        Ok(optimizer::optimize(code))
    } else {
        Ok(code)
    }
}

/// Run `code` on the reference machine, reading `In` values from `input`.
pub fn run(code: &Code, input: &[i32], options: ExecutionOptions) -> Result<Execution, Error> {
    Ok(VM::execute(code, input, options)?)
}
