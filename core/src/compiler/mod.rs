//! Translator from the AST to a flat, fully resolved program.
//!
//! The translator walks the tree once and appends instructions to a single
//! buffer. Anything whose target is not known yet is emitted as a
//! placeholder and backpatched:
//!
//! - branch and loop exits are patched as soon as the code they skip has
//!   been emitted;
//! - callee addresses are patched after the last function, when every entry
//!   address is known.
//!
//! ## Design
//!
//! - Exhaustive matches over the closed AST node kinds
//! - Absolute addresses are plain indices into the instruction buffer
//! - Call sites reserve one `Nop` per argument for the tail-call rewriter

mod error;
mod translator;


pub use error::{CompileError, MainError};
pub use translator::translate;
