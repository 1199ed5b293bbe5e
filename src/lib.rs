//! stackc - a compiler backend for a small imperative language
//!
//! # Overview
//!
//! The backend turns an already-parsed program into a flat instruction
//! sequence for a stack machine, in two passes:
//!
//! 1. **Translation** ([`translate`]): a single walk over the AST that emits
//!    code with placeholders for not-yet-known addresses and fills them in
//!    once the addresses exist (backpatching). Calls may refer to functions
//!    defined later in the program.
//! 2. **Tail-call rewriting** ([`optimize`]): recognizes calls in tail
//!    position whose callee has the same frame shape as the caller, and
//!    rewrites them in place into "store arguments, jump to the body". The
//!    program length never changes, so no address has to be relocated.
//!
//! A reference machine ([`VM`]) runs the result, which makes the two passes
//! testable end to end.
//!
//! # Quick Start
//!
//! ```
//! use stackc::ast::{AstBuilder, BinaryOp, ComparisonOp};
//! use stackc::{Bump, CompilationOptions, ExecutionOptions, compile, run};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//!
//! // sum(n, acc) { if (n == 0) return acc; else return sum(n - 1, acc + n); }
//! let sum = b.function(
//!     "sum",
//!     &["n", "acc"],
//!     &[],
//!     &[b.if_else(
//!         b.compare(ComparisonOp::Eq, b.var("n"), b.num(0)),
//!         b.ret(b.var("acc")),
//!         b.ret(b.call(
//!             "sum",
//!             &[
//!                 b.binary(BinaryOp::Sub, b.var("n"), b.num(1)),
//!                 b.binary(BinaryOp::Add, b.var("acc"), b.var("n")),
//!             ],
//!         )),
//!     )],
//! );
//! // main() { var n; read n; write sum(n, 0); return 0; }
//! let main = b.function(
//!     "main",
//!     &[],
//!     &[&["n"]],
//!     &[
//!         b.read("n"),
//!         b.write(b.call("sum", &[b.var("n"), b.num(0)])),
//!         b.ret(b.num(0)),
//!     ],
//! );
//! let program = b.program(&[main, sum]);
//!
//! let code = compile(&program, &CompilationOptions::default()).unwrap();
//! let execution = run(&code, &[10_000], ExecutionOptions::default()).unwrap();
//! assert_eq!(execution.output, vec![50_005_000]);
//! assert_eq!(execution.max_call_depth, 2);
//! ```
//!
//! # Resource limits
//!
//! [`ExecutionOptions`] bounds the call depth and, optionally, the number of
//! executed instructions. Hitting either limit yields
//! [`Error::ResourceExceeded`].

// Re-export public API from stackc_core
pub use stackc_core::api::{CompilationOptions, Error, ExecutionOptions, compile, run};

// Re-export the AST and the passes
pub use stackc_core::ast::{self, AstBuilder, Function, Program};
pub use stackc_core::compiler::{CompileError, MainError, translate};
pub use stackc_core::optimizer::{TailCallRewriter, optimize};

// Re-export the instruction set and the reference machine
pub use stackc_core::vm::{
    self, Code, Execution, ExecutionError, FrameScan, Instruction, Opcode, VM, scan_frame,
};

pub use bumpalo::Bump;
